pub use crate::config::*;
use crate::{Assessment, CurrentStateRow, FarmProject, PlannedStateRow, SitePlan};

/// A builder for assembling a project by hand.
///
/// The builder keeps the licensing assessment without a difficulty, whatever is passed in.
///
/// ```
/// use farm_project::builder::Builder;
/// use farm_project::{Severity, Difficulty};
///
/// let project = Builder::new()
///     .address("Hauptstr.", "5", "12345", "Musterstadt")
///     .project_number("P-001")
///     .licensing(Severity::Yellow, "Änderungsgenehmigung erforderlich")
///     .receptor_sites(Severity::Green, Difficulty::Level(Severity::Red))
///     .current_unit("BE1", "Mastschweine", 100, "1", true, false)
///     .planned_unit("BE1", "Mastschweine", 120, "2")
///     .build()?;
///
/// assert_eq!(project.current_state.len(), 1);
/// # Ok::<(), farm_project::ModelError>(())
/// ```
pub struct Builder {
    pub(crate) _project: FarmProject,
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _project: FarmProject::default(),
        }
    }

    pub fn address(
        mut self,
        street: &str,
        house_number: &str,
        postal_code: &str,
        city: &str,
    ) -> Builder {
        self._project.street = street.to_string();
        self._project.house_number = house_number.to_string();
        self._project.postal_code = postal_code.to_string();
        self._project.city = city.to_string();
        self
    }

    pub fn project_number(mut self, pnr: &str) -> Builder {
        self._project.project_number = pnr.to_string();
        self
    }

    pub fn texts(mut self, licensing: &str, location: &str, summary: &str) -> Builder {
        self._project.licensing_text = licensing.to_string();
        self._project.location_text = location.to_string();
        self._project.summary_text = summary.to_string();
        self
    }

    pub fn licensing(mut self, effort: Severity, reason: &str) -> Builder {
        let mut a = Assessment::without_difficulty(effort);
        a.effort_reason = reason.to_string();
        self._project.licensing = a;
        self
    }

    pub fn receptor_sites(mut self, effort: Severity, difficulty: Difficulty) -> Builder {
        self._project.receptor_sites = Assessment::new(effort, difficulty);
        self
    }

    pub fn neighboring_operations(mut self, effort: Severity, difficulty: Difficulty) -> Builder {
        self._project.neighboring_operations = Assessment::new(effort, difficulty);
        self
    }

    pub fn current_vs_planned(mut self, effort: Severity, difficulty: Difficulty) -> Builder {
        self._project.current_vs_planned = Assessment::new(effort, difficulty);
        self
    }

    /// Adds a unit to the current state. The execution goes through the same
    /// normalization as the workbook values.
    pub fn current_unit(
        mut self,
        unit_id: &str,
        category: &str,
        capacity: u32,
        execution: &str,
        chimneys: bool,
        state_of_the_art: bool,
    ) -> Builder {
        self._project.current_state.push(CurrentStateRow {
            unit_id: unit_id.to_string(),
            category: CurrentCategory::from(category.to_string()),
            capacity,
            execution: ExecutionType::normalize(execution),
            chimneys: YesNo::from(chimneys),
            state_of_the_art: YesNo::from(state_of_the_art),
        });
        self
    }

    pub fn planned_unit(
        mut self,
        unit_id: &str,
        category: &str,
        capacity: u32,
        execution: &str,
    ) -> Builder {
        self._project.planned_state.push(PlannedStateRow {
            unit_id: unit_id.to_string(),
            category: PlannedCategory::from(category.to_string()),
            capacity,
            execution: ExecutionType::normalize(execution),
        });
        self
    }

    pub fn site_plan(mut self, image: Vec<u8>) -> Builder {
        self._project.site_plan = Some(SitePlan::from_bytes(image));
        self
    }

    pub fn build(self) -> Result<FarmProject, ModelError> {
        self._project.validate()?;
        Ok(self._project)
    }
}
