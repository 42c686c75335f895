/// Composers: assemble selected fragments into a document in a fixed
/// structural order.
use tracing::debug;

use super::catalog::Catalog;
use super::config::Palette;
use super::markup::{GeneratedDocument, MarkupWriter};
use super::resolver::Axes;
use super::selectors;
use crate::schema::axis::{PermissionLevel, StoryLength, Tone};

const HOOK_STYLE: &str = "font-size: 20px; color: #333;";

fn tone_color(palette: &Palette, level: PermissionLevel) -> &str {
    palette.color(level.tone())
}

fn paragraphs(w: &mut MarkupWriter, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            w.gap();
        }
        w.raw(item);
    }
}

fn list(w: &mut MarkupWriter, marker: &str, lines: &[&str]) {
    for line in lines {
        w.raw(marker).raw(line).br();
    }
}

fn hashtag_block(w: &mut MarkupWriter, palette: &Palette, tags: &[String], centered: bool) {
    let mut style = format!(
        "margin-top: 20px; padding-top: 15px; border-top: 1px solid #e0e0e0; color: {}; font-size: 14px;",
        palette.color(Tone::Base)
    );
    if centered {
        style.push_str(" text-align: center;");
    }
    w.open("div", &style);
    for tag in tags {
        w.styled("span", "margin-right: 8px;", tag);
    }
    w.close("div");
}

fn detail_box(w: &mut MarkupWriter, style: &str, heading: &str) {
    w.open("div", style).heading(heading).gap();
}

/// Structured persuasive content: hook, pacing, understanding, decision,
/// value, trust, offer, hashtags. The order never depends on content type.
pub fn assemble_content(catalog: &Catalog, palette: &Palette, axes: &Axes) -> GeneratedDocument {
    let level = axes.level();
    let content_type = axes.content_type();
    let hook = selectors::hook(catalog, axes);
    debug!(
        level = %level,
        content_type = %content_type,
        variant = axes.variant.ordinal(),
        exact = hook.is_exact(),
        "assembling content"
    );

    let labels = &catalog.content().labels;
    let mut w = MarkupWriter::new();

    w.styled("strong", HOOK_STYLE, hook.fragment).gap();

    let pacing = selectors::pacing(catalog, level);
    w.raw(&pacing.acknowledgement).br().raw(&pacing.validation).gap();

    let understanding = selectors::understanding(catalog, level);
    w.heading(&understanding.problem_identification)
        .br()
        .raw(&understanding.root_cause)
        .br()
        .raw(&understanding.solution)
        .gap();

    let decision = selectors::decision_point(catalog, level);
    w.heading(&labels.decision_heading).br();
    list(
        &mut w,
        "• ",
        &[
            decision.options.as_str(),
            decision.pros_and_cons.as_str(),
            decision.autonomy.as_str(),
        ],
    );
    w.br();

    let value = selectors::value_proposition(catalog, level);
    w.heading(selectors::value_header(catalog, level)).br();
    let mut value_lines = vec![
        value.immediate.as_str(),
        value.long_term.as_str(),
        value.lifestyle.as_str(),
    ];
    value_lines.extend(selectors::value_extras(catalog, level).iter().map(String::as_str));
    list(&mut w, "✓ ", &value_lines);
    w.br();

    let trust = selectors::trust_proof(catalog, level);
    w.heading(&labels.trust_heading).br();
    let mut trust_lines = vec![
        trust.social_proof.as_str(),
        trust.authority.as_str(),
        trust.guarantee.as_str(),
    ];
    trust_lines.extend(selectors::trust_extras(catalog, level).iter().map(String::as_str));
    list(&mut w, "• ", &trust_lines);
    w.br();

    let offer_style = format!("color: {};", tone_color(palette, level));
    w.styled("strong", &offer_style, selectors::offer(catalog, level)).gap();

    hashtag_block(&mut w, palette, selectors::hashtags(catalog, axes), false);
    w.finish()
}

/// Narrative content. Elaboration blocks are added by story length, each
/// longer length rendering everything the shorter one does.
pub fn assemble_story(
    catalog: &Catalog,
    palette: &Palette,
    axes: &Axes,
    length: StoryLength,
    clinic: &str,
) -> GeneratedDocument {
    let level = axes.level();
    let content_type = axes.content_type();
    debug!(level = %level, content_type = %content_type, length = %length, "assembling story");

    let labels = &catalog.story().labels;
    let base = palette.color(Tone::Base);
    let mut w = MarkupWriter::new();

    // Header
    w.open("div", "text-align: center; margin-bottom: 30px;")
        .styled(
            "strong",
            &format!("font-size: 24px; color: {};", base),
            &labels.title,
        )
        .br()
        .styled("span", "font-size: 14px; color: #999;", &labels.subtitle)
        .close("div");

    // Character
    let character = selectors::character(catalog, content_type);
    w.open(
        "div",
        "margin-bottom: 25px; padding: 20px; background: #f8f9fa; border-radius: 12px;",
    )
    .styled(
        "strong",
        "font-size: 18px; color: #333;",
        &format!("◆ {}", character.name),
    )
    .gap()
    .raw(&character.background)
    .raw(".")
    .br()
    .raw(&character.fear)
    .raw(", ")
    .raw(&labels.contrast)
    .raw(" ")
    .raw(&character.desire)
    .raw(".");
    if length.includes_medium_detail() {
        w.gap();
        detail_box(
            &mut w,
            "padding: 15px; background: white; border-radius: 8px; margin-top: 15px;",
            &labels.background_heading,
        );
        paragraphs(&mut w, selectors::background(catalog, content_type));
        w.close("div");
    }
    w.close("div");

    // Conflict
    let conflict = selectors::conflict(catalog, content_type);
    w.open("div", "margin-bottom: 25px;")
        .styled(
            "strong",
            &format!("font-size: 16px; color: {};", palette.color(Tone::Accent)),
            &format!("【 {} 】", labels.crisis_heading),
        )
        .gap()
        .raw(&conflict.situation)
        .gap()
        .styled("em", "color: #666;", &conflict.inner_conflict)
        .gap()
        .raw(&conflict.escalation)
        .gap()
        .raw(&conflict.crisis);
    if length.includes_long_detail() {
        w.gap();
        detail_box(
            &mut w,
            "padding: 15px; background: #fff5f5; border-radius: 8px; margin-top: 15px;",
            &labels.crisis_detail_heading,
        );
        paragraphs(&mut w, selectors::crisis_detail(catalog, content_type));
        w.close("div");
    }
    w.close("div");

    // Resolution
    let resolution = selectors::resolution(catalog, content_type);
    w.open(
        "div",
        "margin-bottom: 25px; padding: 20px; background: #fff9e6; border-left: 4px solid #ffa500; border-radius: 8px;",
    )
    .styled(
        "strong",
        "font-size: 16px; color: #333;",
        &format!("【 {} 】", labels.turning_point_heading),
    )
    .gap()
    .raw(&selectors::discovery(catalog, content_type, clinic))
    .gap()
    .raw(&resolution.first_contact)
    .gap()
    .raw(&resolution.first_visit)
    .gap();
    let inset = "padding: 15px; background: #fffef0; border-radius: 8px; margin: 15px 0;";
    if length.includes_medium_detail() {
        detail_box(&mut w, inset, &labels.first_meeting_heading);
        paragraphs(&mut w, &selectors::first_meeting(catalog, &character.name));
        w.close("div");
    }
    w.raw(&resolution.process).gap();
    if length.includes_long_detail() {
        detail_box(&mut w, inset, &labels.journey_heading);
        let beats = selectors::treatment_journey(catalog, content_type, &character.name);
        for (i, beat) in beats.iter().enumerate() {
            if i > 0 && beat.continues {
                w.br();
            } else if i > 0 {
                w.gap();
            }
            if let Some(label) = beat.label {
                w.strong(label).raw(" ");
            }
            w.raw(&beat.text);
        }
        w.close("div");
    }
    w.strong(&resolution.outcome).close("div");

    // Transformation
    let transformation = selectors::transformation(catalog, content_type);
    w.open("div", "margin-bottom: 25px;")
        .styled(
            "strong",
            &format!("font-size: 16px; color: {};", base),
            &format!("【 {} 】", labels.change_heading),
        )
        .gap();
    let changes = [
        (&labels.immediate_label, &transformation.immediate),
        (&labels.emotional_label, &transformation.emotional),
        (&labels.lifestyle_label, &transformation.lifestyle),
        (&labels.future_label, &transformation.future),
    ];
    for (i, (label, text)) in changes.iter().enumerate() {
        if i > 0 {
            w.gap();
        }
        w.strong(&format!("✓ {}", label)).raw(" ").raw(text);
    }
    if length.includes_medium_detail() {
        w.gap();
        detail_box(
            &mut w,
            "padding: 15px; background: #f0f7ff; border-radius: 8px; margin-top: 15px;",
            &labels.follow_up_heading,
        );
        paragraphs(&mut w, selectors::follow_up(catalog, content_type));
        w.close("div");
    }
    w.close("div");

    // Message
    let message = selectors::message(catalog, axes);
    w.open(
        "div",
        &format!(
            "text-align: center; padding: 25px; background: linear-gradient(135deg, {} 0%, #764ba2 100%); border-radius: 12px; color: white;",
            base
        ),
    )
    .styled("strong", "font-size: 18px;", &message.lesson)
    .gap()
    .raw(&message.invitation)
    .gap()
    .styled("em", "font-size: 16px;", &format!("\"{}\"", message.promise))
    .close("div");

    // Call to action
    let cta = selectors::call_to_action(catalog, level);
    w.open("div", "text-align: center; margin-top: 30px;")
        .styled(
            "strong",
            &format!("font-size: 18px; color: {};", tone_color(palette, level)),
            &cta.title,
        )
        .gap()
        .styled("span", "font-size: 14px; color: #666;", &cta.subtitle)
        .close("div");

    w.br();
    hashtag_block(&mut w, palette, selectors::hashtags(catalog, axes), true);
    w.finish()
}
