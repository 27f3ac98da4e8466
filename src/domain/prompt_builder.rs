//! Prompt text assembly from form data.

use crate::domain::FormData;

/// Jurisdictional framework every prompt starts with. Not user-editable.
pub const JURISDICTION_PREAMBLE: &str = "IMPORTANTE: Todas las respuestas deben estar estrictamente basadas en el marco legal vigente en toda la República Mexicana, tomando como base primordial la Constitución Política de los Estados Unidos Mexicanos. Si se requiere jurisprudencia, debe ser citada exclusivamente del Semanario Judicial de la Federación.";

const SECTION_SEPARATOR: &str = "\n\n";

/// Build the final prompt text.
///
/// Fields are copied verbatim. Callers only invoke this once `task` and
/// `context` are non-empty; no validation happens here.
pub fn build_prompt(form: &FormData) -> String {
    let user_block = format!(
        "Rol={}\nTarea={}\nContexto={}\nTono={}\nLenguaje={}",
        form.role, form.task, form.context, form.tone, form.language
    );
    with_preamble(&user_block)
}

/// Prefix a user-authored block with the preamble and blank-line separator.
pub fn with_preamble(user_block: &str) -> String {
    format!("{}{}{}", JURISDICTION_PREAMBLE, SECTION_SEPARATOR, user_block)
}

/// Remove the first exact occurrence of the preamble and trim what remains.
pub fn strip_preamble(prompt: &str) -> String {
    prompt.replacen(JURISDICTION_PREAMBLE, "", 1).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LegalArea, Register, Tone};
    use proptest::prelude::*;

    fn sample_form() -> FormData {
        FormData {
            area_of_law: LegalArea::Penal,
            role: LegalArea::Penal.default_role(),
            task: "Redactar una denuncia".to_string(),
            context: "Robo con violencia en CDMX".to_string(),
            tone: Tone::FirmeYEnergico,
            language: Register::Forense,
        }
    }

    #[test]
    fn builds_preamble_then_key_value_block() {
        let prompt = build_prompt(&sample_form());

        let expected = format!(
            "{}\n\nRol=Actúa como un abogado especialista en Penal\nTarea=Redactar una denuncia\nContexto=Robo con violencia en CDMX\nTono=Firme y enérgico\nLenguaje=Estilo forense",
            JURISDICTION_PREAMBLE
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn fields_are_not_escaped() {
        let form = FormData {
            context: "línea 1\nTono=inyectado".to_string(),
            ..sample_form()
        };
        let prompt = build_prompt(&form);
        assert!(prompt.contains("Contexto=línea 1\nTono=inyectado\nTono=Firme y enérgico"));
    }

    #[test]
    fn strip_preamble_returns_user_block() {
        let prompt = build_prompt(&sample_form());
        let stripped = strip_preamble(&prompt);
        assert!(stripped.starts_with("Rol="));
        assert!(stripped.ends_with("Lenguaje=Estilo forense"));
    }

    #[test]
    fn strip_preamble_leaves_text_without_preamble() {
        assert_eq!(strip_preamble("  Rol=X\nTarea=Y  "), "Rol=X\nTarea=Y");
    }

    proptest! {
        #[test]
        fn build_is_deterministic_and_framed(
            role in ".{0,40}",
            task in ".{1,40}",
            context in ".{1,40}",
            area in 0usize..LegalArea::ALL.len(),
        ) {
            let form = FormData {
                area_of_law: LegalArea::ALL[area],
                role,
                task,
                context,
                ..FormData::default()
            };

            let first = build_prompt(&form);
            let second = build_prompt(&form);

            prop_assert_eq!(&first, &second);
            prop_assert!(first.starts_with(JURISDICTION_PREAMBLE));
            prop_assert!(first[JURISDICTION_PREAMBLE.len()..].starts_with("\n\nRol="));
        }
    }
}
