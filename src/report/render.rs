// HTML rendering of the report, and its conversion into a paged document.

use base64::Engine;
use chrono::NaiveDate;
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;
use serde_json::{json, Value as JSValue};
use std::fmt::Display;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::report::texts::TEXTS;
use crate::report::*;

const STYLE: &str = include_str!("../../templates/style.css");
const LOGO: &[u8] = include_bytes!("../../assets/logo.svg");

const TEMPLATE_FULL: &str = include_str!("../../templates/report.hbs");
const TEMPLATE_SHORT: &str = include_str!("../../templates/report_short.hbs");
const PARTIALS: [(&str, &str); 4] = [
    ("cover", include_str!("../../templates/partials/cover.hbs")),
    ("assessment", include_str!("../../templates/partials/assessment.hbs")),
    ("overview", include_str!("../../templates/partials/overview.hbs")),
    ("next_steps", include_str!("../../templates/partials/next_steps.hbs")),
];

#[derive(Debug, Snafu)]
pub enum RenderError {
    #[snafu(display("The template {name} is invalid: {source}"))]
    Template {
        source: handlebars::TemplateError,
        name: String,
    },
    #[snafu(display("The markup could not be produced: {source}"))]
    Markup { source: handlebars::RenderError },
    #[snafu(display("PDF-Erzeugung fehlgeschlagen: {error_count} Fehler ({detail})"))]
    Layout { error_count: usize, detail: String },
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum ReportVariant {
    #[default]
    Full,
    /// Cover, housing counts, summary and next steps.
    Short,
}

impl ReportVariant {
    pub fn template_name(&self) -> &'static str {
        match self {
            ReportVariant::Full => "report",
            ReportVariant::Short => "report_short",
        }
    }
}

impl Display for ReportVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.template_name())
    }
}

/// Why a layout engine could not produce a document.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LayoutFailure {
    pub error_count: usize,
    pub detail: String,
}

/// Turns the HTML markup (with its stylesheet inlined) into a paged document.
pub trait PageLayout {
    fn layout(&self, markup: &str) -> Result<Vec<u8>, LayoutFailure>;
}

/// Runs an external converter that reads HTML on stdin and writes the document on stdout.
pub struct CommandLayout {
    program: String,
    args: Vec<String>,
}

impl CommandLayout {
    pub fn new(settings: &LayoutSettings) -> CommandLayout {
        CommandLayout {
            program: settings.program.clone(),
            args: settings.args.clone(),
        }
    }
}

impl PageLayout for CommandLayout {
    fn layout(&self, markup: &str) -> Result<Vec<u8>, LayoutFailure> {
        debug!("CommandLayout: {} {:?}", self.program, self.args);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| LayoutFailure {
                error_count: 1,
                detail: format!("{} could not be started: {}", self.program, e),
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| LayoutFailure {
            error_count: 1,
            detail: "no standard input".to_string(),
        })?;
        let input = markup.as_bytes().to_vec();
        // Written from another thread, so that a full stdout pipe cannot block the writer.
        let writer = std::thread::spawn(move || stdin.write_all(&input));

        let output = child.wait_with_output().map_err(|e| LayoutFailure {
            error_count: 1,
            detail: e.to_string(),
        })?;
        let written = matches!(writer.join(), Ok(Ok(())));

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            debug!("{}: {}", self.program, line);
        }
        if output.status.success() && written && !output.stdout.is_empty() {
            return Ok(output.stdout);
        }

        let error_lines: Vec<&str> = stderr
            .lines()
            .filter(|l| l.to_lowercase().contains("error"))
            .collect();
        let detail = if !output.status.success() {
            format!("{} exited with {}", self.program, output.status)
        } else if !written {
            format!("{} did not read the whole markup", self.program)
        } else {
            format!("{} produced no output", self.program)
        };
        Err(LayoutFailure {
            error_count: error_lines.len().max(1),
            detail: match error_lines.first() {
                Some(l) => format!("{}: {}", detail, l.trim()),
                None => detail,
            },
        })
    }
}

/// The inputs of a rendering that do not come from the project.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RenderContext {
    pub date: NaiveDate,
}

impl RenderContext {
    pub fn new(date: NaiveDate) -> RenderContext {
        RenderContext { date }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AssessmentEntry<'a> {
    topic: &'static str,
    effort: Severity,
    effort_name: &'static str,
    effort_reason: &'a str,
    difficulty: Difficulty,
    difficulty_name: &'static str,
    difficulty_reason: &'a str,
}

fn assessment_entries(project: &FarmProject) -> Vec<AssessmentEntry<'_>> {
    project
        .assessments()
        .into_iter()
        .enumerate()
        .map(|(idx, (topic, a))| {
            // Licensing has no difficulty, whatever is stored.
            let difficulty = if idx == 0 {
                Difficulty::NotApplicable
            } else {
                a.difficulty
            };
            AssessmentEntry {
                topic,
                effort: a.effort,
                effort_name: a.effort.display().name,
                effort_reason: a.effort_reason.as_str(),
                difficulty,
                difficulty_name: match difficulty {
                    Difficulty::Level(s) => s.display().name,
                    Difficulty::NotApplicable => NOT_APPLICABLE_LABEL,
                },
                difficulty_reason: if idx == 0 {
                    ""
                } else {
                    a.difficulty_reason.as_str()
                },
            }
        })
        .collect()
}

fn logo_uri() -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(LOGO)
    )
}

fn build_context(project: &FarmProject, ctx: &RenderContext) -> JSValue {
    let legend: Vec<_> = Severity::ALL.iter().map(|s| s.display()).collect();
    let review: Vec<JSValue> = project
        .review
        .entries()
        .iter()
        .map(|(title, outcome)| json!({"title": title, "outcome": outcome.label()}))
        .collect();
    json!({
        "css": STYLE,
        "logoUri": logo_uri(),
        "datum": ctx.date.format("%d.%m.%Y").to_string(),
        "project": project,
        "address": project.address_one_line(),
        "sitePlanUri": project.site_plan.as_ref().map(|p| p.data_uri()),
        "texts": TEXTS,
        "legend": legend,
        "assessments": assessment_entries(project),
        "review": review,
        "totals": {
            "current": project.total_current_capacity(),
            "planned": project.total_planned_capacity(),
            "currentUnits": project.current_state.len(),
            "plannedUnits": project.planned_state.len(),
        },
    })
}

handlebars_helper!(ampel_class: |v: JSValue| {
    v.as_str()
        .and_then(|s| s.parse::<Difficulty>().ok())
        .map(|d| d.css_class())
        .unwrap_or("")
});

fn registry() -> Result<Handlebars<'static>, RenderError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("ampel_class", Box::new(ampel_class));
    for (name, source) in PARTIALS {
        handlebars
            .register_partial(name, source)
            .context(TemplateSnafu { name })?;
    }
    for (variant, source) in [
        (ReportVariant::Full, TEMPLATE_FULL),
        (ReportVariant::Short, TEMPLATE_SHORT),
    ] {
        handlebars
            .register_template_string(variant.template_name(), source)
            .context(TemplateSnafu {
                name: variant.template_name(),
            })?;
    }
    Ok(handlebars)
}

/// Produces the HTML markup of a report. The project is only read.
pub fn render_markup(
    project: &FarmProject,
    variant: ReportVariant,
    ctx: &RenderContext,
) -> Result<String, RenderError> {
    let handlebars = registry()?;
    let data = build_context(project, ctx);
    let markup = handlebars
        .render(variant.template_name(), &data)
        .context(MarkupSnafu {})?;
    debug!("render_markup: {}: {} bytes", variant, markup.len());
    Ok(markup)
}

/// Produces the paged document of a report. Either the whole document is
/// returned, or an error.
pub fn render_document(
    project: &FarmProject,
    variant: ReportVariant,
    ctx: &RenderContext,
    layout: &dyn PageLayout,
) -> Result<Vec<u8>, RenderError> {
    let markup = render_markup(project, variant, ctx)?;
    info!("Laying out the {} report", variant);
    match layout.layout(&markup) {
        Ok(bytes) => Ok(bytes),
        Err(failure) => {
            warn!("Layout failed: {:?}", failure);
            LayoutSnafu {
                error_count: failure.error_count,
                detail: failure.detail,
            }
            .fail()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_project::builder::Builder;
    use std::cell::RefCell;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn date() -> RenderContext {
        RenderContext::new(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
    }

    fn example_project() -> FarmProject {
        let mut p = Builder::new()
            .address("Hauptstr.", "5", "12345", "Musterstadt")
            .project_number("P-001")
            .texts(
                "Änderungsgenehmigung nach § 16 BImSchG",
                "Ortsrandlage",
                "Das Vorhaben ist voraussichtlich genehmigungsfähig.",
            )
            .licensing(Severity::Green, "")
            .receptor_sites(Severity::Yellow, Difficulty::Level(Severity::Red))
            .neighboring_operations(Severity::Green, Difficulty::Level(Severity::Yellow))
            .current_vs_planned(Severity::Red, Difficulty::Level(Severity::Green))
            .current_unit("BE1", "Mastschweine", 100, "1", true, false)
            .current_unit("BE2", "Sauen / Eber", 40, "3", false, false)
            .planned_unit("BE1", "Mastschweine", 120, "2")
            .planned_unit("BE2", "Keine", 0, "3")
            .build()
            .unwrap();
        p.receptor_sites.effort_reason = "Wohnbebauung in 150 m".to_string();
        p
    }

    fn all_green() -> FarmProject {
        Builder::new()
            .address("Hauptstr.", "5", "12345", "Musterstadt")
            .current_unit("BE1", "Mastschweine", 100, "1", true, false)
            .planned_unit("BE1", "Mastschweine", 120, "2")
            .build()
            .unwrap()
    }

    // The class attributes of the assessment cells.
    fn ampel_classes(markup: &str) -> Vec<String> {
        markup
            .split("class=\"")
            .skip(1)
            .filter_map(|s| s.split('"').next())
            .filter(|c| c.starts_with("ampel-") || c.is_empty())
            .map(|c| c.to_string())
            .collect()
    }

    struct FakeLayout {
        seen: RefCell<Vec<String>>,
        fail: Option<LayoutFailure>,
    }

    impl FakeLayout {
        fn ok() -> FakeLayout {
            FakeLayout {
                seen: RefCell::new(Vec::new()),
                fail: None,
            }
        }
    }

    impl PageLayout for FakeLayout {
        fn layout(&self, markup: &str) -> Result<Vec<u8>, LayoutFailure> {
            self.seen.borrow_mut().push(markup.to_string());
            match &self.fail {
                Some(f) => Err(f.clone()),
                None => Ok(markup.as_bytes().to_vec()),
            }
        }
    }

    #[test]
    fn helper_classes() {
        init();
        let mut h = Handlebars::new();
        h.register_helper("ampel_class", Box::new(ampel_class));
        let render = |v: &str| {
            h.render_template("{{ampel_class v}}", &json!({ "v": v }))
                .unwrap()
        };
        assert_eq!(render("green"), "ampel-green");
        assert_eq!(render("yellow"), "ampel-yellow");
        assert_eq!(render("red"), "ampel-red");
        assert_eq!(render("Kein Einfluss"), "");
        assert_eq!(render("purple"), "");
    }

    #[test]
    fn deterministic() {
        init();
        let p = example_project();
        for variant in [ReportVariant::Full, ReportVariant::Short] {
            let a = render_document(&p, variant, &date(), &FakeLayout::ok()).unwrap();
            let b = render_document(&p, variant, &date(), &FakeLayout::ok()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn context_contents() {
        init();
        let markup = render_markup(&example_project(), ReportVariant::Full, &date()).unwrap();
        assert!(markup.contains("14.03.2025"));
        assert!(markup.contains("Hauptstr. 5, 12345 Musterstadt"));
        assert!(markup.contains("P-001"));
        assert!(markup.contains("data:image/svg+xml;base64,"));
        assert!(markup.contains(".ampel-green"));
        assert!(markup.contains("Wohnbebauung in 150 m"));
        assert!(markup.contains("2 - Zwangsbelüfteter Stall mit Auslauf"));
        assert!(markup.contains("Ingenieurbüro Richters &amp; Hüls"));
        // Current and planned totals.
        assert!(markup.contains(">140<"));
        assert!(markup.contains(">120<"));
        assert!(!markup.contains("Lageplan des Vorhabens"));
    }

    #[test]
    fn site_plan_is_embedded() {
        init();
        let mut p = example_project();
        p.site_plan = Some(SitePlan::from_bytes(vec![0x89, 0x50, 0x4E, 0x47]));
        let markup = render_markup(&p, ReportVariant::Full, &date()).unwrap();
        assert!(markup.contains("Lageplan des Vorhabens"));
        assert!(markup.contains("src=\"data:image/png;base64,iVBORw&#x3D;&#x3D;\""));
    }

    #[test]
    fn site_plan_media_type_stays_in_the_attribute() {
        init();
        let mut p = example_project();
        p.site_plan = Some(SitePlan {
            media_type: "x\" onerror=\"alert(1)".to_string(),
            data: vec![1, 2, 3],
        });
        let markup = render_markup(&p, ReportVariant::Full, &date()).unwrap();
        assert!(!markup.contains("onerror=\""));
        assert!(markup.contains("src=\"data:x&quot; onerror&#x3D;&quot;alert(1);base64,AQID\""));
    }

    #[test]
    fn all_green_assessments() {
        init();
        for variant in [ReportVariant::Full, ReportVariant::Short] {
            let markup = render_markup(&all_green(), variant, &date()).unwrap();
            let classes = ampel_classes(&markup);
            assert!(classes.iter().any(|c| c == "ampel-green"));
            assert!(classes.iter().all(|c| c == "ampel-green" || c.is_empty()));
            assert!(!markup.contains("class=\"ampel-yellow\""));
            assert!(!markup.contains("class=\"ampel-red\""));
            // Only the licensing difficulty cells have no class.
            let unclassed = markup.matches("<td class=\"\">Kein Einfluss</td>").count();
            assert!(unclassed >= 1);
            assert_eq!(classes.iter().filter(|c| c.is_empty()).count(), unclassed);
        }
    }

    #[test]
    fn licensing_difficulty_is_never_colored() {
        init();
        let mut p = all_green();
        // Bypasses the validation of the builder.
        p.licensing.difficulty = Difficulty::Level(Severity::Red);
        p.licensing.difficulty_reason = "sollte nicht erscheinen".to_string();
        let markup = render_markup(&p, ReportVariant::Full, &date()).unwrap();
        assert!(!markup.contains("class=\"ampel-red\""));
        assert!(markup.contains("<td class=\"\">Kein Einfluss</td>"));
        assert!(!markup.contains("sollte nicht erscheinen"));
    }

    #[test]
    fn mixed_ratings() {
        init();
        let markup = render_markup(&example_project(), ReportVariant::Full, &date()).unwrap();
        let classes = ampel_classes(&markup);
        assert!(classes.iter().any(|c| c == "ampel-yellow"));
        assert!(classes.iter().any(|c| c == "ampel-red"));
    }

    #[test]
    fn short_variant_is_a_subset() {
        init();
        let p = example_project();
        let full = render_markup(&p, ReportVariant::Full, &date()).unwrap();
        let short = render_markup(&p, ReportVariant::Short, &date()).unwrap();
        assert!(short.len() < full.len());
        for landmark in [
            "Hauptstr. 5, 12345 Musterstadt",
            "Zusammenfassung",
            "Das Vorhaben ist voraussichtlich genehmigungsfähig.",
            "Weitere Schritte",
            "Herr Andre Feldhaus",
            "Tierplätze",
        ] {
            assert!(short.contains(landmark), "{}", landmark);
            assert!(full.contains(landmark), "{}", landmark);
        }
        assert!(!short.contains("Einleitung"));
        assert!(!short.contains("Prüfungserfordernis"));
    }

    #[test]
    fn layout_failure_is_an_error() {
        init();
        let layout = FakeLayout {
            seen: RefCell::new(Vec::new()),
            fail: Some(LayoutFailure {
                error_count: 3,
                detail: "missing font".to_string(),
            }),
        };
        let res = render_document(&example_project(), ReportVariant::Full, &date(), &layout);
        match res {
            Err(RenderError::Layout { error_count, detail }) => {
                assert_eq!(error_count, 3);
                assert_eq!(detail, "missing font");
            }
            x => panic!("unexpected result: {:?}", x.map(|b| b.len())),
        }
        assert_eq!(layout.seen.borrow().len(), 1);
    }

    #[test]
    fn project_is_not_modified() {
        init();
        let p = example_project();
        let before = p.clone();
        render_document(&p, ReportVariant::Short, &date(), &FakeLayout::ok()).unwrap();
        assert_eq!(p, before);
    }

    #[cfg(unix)]
    #[test]
    fn command_layout() {
        init();
        let cat = CommandLayout::new(&LayoutSettings {
            program: "cat".to_string(),
            args: vec![],
        });
        assert_eq!(cat.layout("<p>x</p>").unwrap(), b"<p>x</p>".to_vec());

        let failing = CommandLayout::new(&LayoutSettings {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "cat > /dev/null; echo 'ERROR: a' >&2; echo 'Error: b' >&2; exit 2".to_string(),
            ],
        });
        let f = failing.layout("<p>x</p>").unwrap_err();
        assert_eq!(f.error_count, 2);
        assert!(f.detail.contains("ERROR: a"));

        let silent = CommandLayout::new(&LayoutSettings {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "cat > /dev/null".to_string()],
        });
        assert_eq!(silent.layout("<p>x</p>").unwrap_err().error_count, 1);

        let missing = CommandLayout::new(&LayoutSettings {
            program: "/nonexistent/converter".to_string(),
            args: vec![],
        });
        assert_eq!(missing.layout("<p>x</p>").unwrap_err().error_count, 1);
    }
}
