//! Structured form data behind a prompt.

use crate::domain::{LegalArea, Register, Tone};

/// Fields the user fills in to describe the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    pub area_of_law: LegalArea,
    pub role: String,
    pub task: String,
    pub context: String,
    pub tone: Tone,
    pub language: Register,
}

impl Default for FormData {
    fn default() -> Self {
        let area = LegalArea::default();
        Self {
            area_of_law: area,
            role: area.default_role(),
            task: String::new(),
            context: String::new(),
            tone: Tone::default(),
            language: Register::default(),
        }
    }
}

impl FormData {
    /// Whether both required fields carry text, so a prompt can be derived.
    pub fn is_complete(&self) -> bool {
        !self.task.is_empty() && !self.context.is_empty()
    }

    /// Whether `role` is untouched: equal to some area's template, or blank.
    pub fn role_matches_any_area_default(&self) -> bool {
        self.role.trim().is_empty()
            || LegalArea::ALL.iter().any(|area| self.role == area.default_role())
    }

    /// Switch the area, re-deriving `role` only when the user has not customised it.
    pub fn select_area(&mut self, area: LegalArea) {
        if self.role_matches_any_area_default() {
            self.role = area.default_role();
        }
        self.area_of_law = area;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_uses_first_area_role() {
        let form = FormData::default();
        assert_eq!(form.area_of_law, LegalArea::Familiar);
        assert_eq!(form.role, "Actúa como un abogado especialista en Familiar");
        assert!(!form.is_complete());
    }

    #[test]
    fn selecting_area_rewrites_default_role() {
        let mut form = FormData { area_of_law: LegalArea::Civil, ..Default::default() };
        form.role = LegalArea::Civil.default_role();

        form.select_area(LegalArea::Penal);

        assert_eq!(form.area_of_law, LegalArea::Penal);
        assert_eq!(form.role, LegalArea::Penal.default_role());
    }

    #[test]
    fn role_of_another_area_still_counts_as_default() {
        let mut form = FormData { role: LegalArea::Laboral.default_role(), ..Default::default() };
        assert!(form.role_matches_any_area_default());

        form.select_area(LegalArea::Amparo);
        assert_eq!(form.role, LegalArea::Amparo.default_role());
    }

    #[test]
    fn blank_role_is_rederived() {
        let mut form = FormData { role: "   ".to_string(), ..Default::default() };
        form.select_area(LegalArea::Mercantil);
        assert_eq!(form.role, LegalArea::Mercantil.default_role());
    }

    #[test]
    fn custom_role_survives_area_changes() {
        let mut form =
            FormData { role: "Actúa como notario público".to_string(), ..Default::default() };
        assert!(!form.role_matches_any_area_default());

        for area in LegalArea::ALL {
            form.select_area(area);
            assert_eq!(form.role, "Actúa como notario público");
            assert_eq!(form.area_of_law, area);
        }
    }

    #[test]
    fn whitespace_only_task_still_counts_as_present() {
        let form =
            FormData { task: " ".to_string(), context: "x".to_string(), ..Default::default() };
        assert!(form.is_complete());
    }
}
