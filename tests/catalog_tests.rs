/// Catalog loading tests: directory loading and load-time validation.

use marketing_engine::core::catalog::{Catalog, CatalogError};
use marketing_engine::core::resolver::Axes;
use marketing_engine::core::selectors;
use marketing_engine::core::template::{Field, TemplateError};
use std::path::Path;

const CATALOG_DIR: &str = "catalog_data/dental_clinic";

fn sources() -> (String, String, String) {
    let dir = Path::new(CATALOG_DIR);
    (
        std::fs::read_to_string(dir.join("content.ron")).unwrap(),
        std::fs::read_to_string(dir.join("story.ron")).unwrap(),
        std::fs::read_to_string(dir.join("strategy.ron")).unwrap(),
    )
}

#[test]
fn directory_catalog_matches_builtin() {
    let from_dir = Catalog::load_from_dir(Path::new(CATALOG_DIR)).unwrap();
    let builtin = Catalog::builtin().unwrap();

    for (level, content_type) in selectors::grid_keys() {
        let axes = Axes::exact(level, content_type);
        assert_eq!(
            selectors::title(&from_dir, &axes, "A", "B"),
            selectors::title(&builtin, &axes, "A", "B")
        );
        assert_eq!(
            selectors::hooks(&from_dir, level, content_type),
            selectors::hooks(&builtin, level, content_type)
        );
    }
}

#[test]
fn missing_directory_is_io_error() {
    let err = Catalog::load_from_dir(Path::new("catalog_data/nowhere")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn malformed_ron_is_rejected() {
    let (_, story, strategy) = sources();
    let err = Catalog::from_sources("( titles: {", &story, &strategy).unwrap_err();
    assert!(matches!(err, CatalogError::Ron(_)));
}

#[test]
fn short_hashtag_list_is_rejected() {
    let (content, story, strategy) = sources();
    let content = content.replace(", \"#평생책임\"]", "]");
    let err = Catalog::from_sources(&content, &story, &strategy).unwrap_err();
    match err {
        CatalogError::HashtagCount { key, found } => {
            assert_eq!(key, "L5.trust");
            assert_eq!(found, 4);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn missing_offer_level_is_rejected() {
    let (content, story, strategy) = sources();
    let content = content.replace("L5: \"지금 바로 시작하세요 - 이달 한정 프로모션\",", "");
    let err = Catalog::from_sources(&content, &story, &strategy).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::MissingEntry { role: "offers", ref key } if key == "L5"
    ));
}

#[test]
fn title_with_disallowed_placeholder_is_rejected() {
    let (content, story, strategy) = sources();
    let content = content.replace(
        "\"{director} 원장이 자세히 설명드립니다\"",
        "\"{character} 원장이 자세히 설명드립니다\"",
    );
    let err = Catalog::from_sources(&content, &story, &strategy).unwrap_err();
    match err {
        CatalogError::Template { role, key, source } => {
            assert_eq!(role, "titles");
            assert_eq!(key, "L0.understanding");
            assert_eq!(source, TemplateError::FieldNotAllowed(Field::Character));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn blank_hook_is_rejected() {
    let (content, story, strategy) = sources();
    let content = content.replace(r#""\"치과 방문이 걱정되시나요?\"","#, r#""   ","#);
    let err = Catalog::from_sources(&content, &story, &strategy).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::EmptyFragment { role: "hooks", ref key } if key == "L0.empathy"
    ));
}
