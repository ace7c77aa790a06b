//! Parsing of the model's structured diagnosis text.
//!
//! The prompt instructs the model to emit six known headings, each on a
//! line of its own. The parser matches those heading lines exactly after
//! trimming; a heading decorated with markdown or extra punctuation will
//! not open its section and its body lines fall through to whichever
//! section was last open.

pub const CLINICAL_PROMPT: &str = "You are to act as a highly experienced and formally trained dentist with over fifty years of distinguished clinical practice in diagnosing and treating a wide range of dental conditions. When an image is uploaded, examine it thoroughly and deliver a precise, professional diagnosis of any identifiable dental condition. Following the diagnosis, provide an in-depth explanation of the condition in clear, clinical yet comprehensible language.
Based on the image, assess and state the potential severity of the condition as a percentage. You must state the severity directly in numeric form such as 85%, and refrain from using phrases such as 'it's difficult to give an exact percentage without further clinical examination'. Your assessment must be image-based and precise.
Next, present practical, evidence-based home remedies or temporary interventions that may offer relief until formal dental consultation is obtained. Then, provide dietary recommendations or food-based solutions that may contribute to the management or prevention of the condition.
Finally, issue a professional and appropriate call for action based on the observed severity — clearly advising whether the individual should seek immediate dental attention or may monitor the situation with care.
All responses must be extremely formal, medically sound, and must follow the exact structured format below. Use these exact headings (clearly separated) in the output and provide corresponding detailed information under each heading:
Dental Condition Name
[Provide the name of the dental condition]
Information About the Condition
[Give a formal, medically accurate explanation of the condition in detail]
Severity Percentage
[State the danger or severity level clearly as a number, such as 72%]
Home Cure or Remedy
[Recommend effective and safe home-based solutions to alleviate symptoms temporarily]
Dietary Options or Food Solutions
[Suggest food items or dietary adjustments that support oral health related to the diagnosed condition]
Call for Action
[Formally advise whether the user must see a dentist urgently or continue monitoring, based on the severity]
Speak as if addressing a real patient in a clinical setting, not as a chatbot. Your language must reflect deep clinical expertise, compassion, and clarity. Do not use informal language, markdown, bullet points, symbols, or AI disclaimers. Your response must always reflect the communication style of a senior dental consultant who has spent a lifetime in clinical care.
";

const HEADERS: [&str; 6] = [
    "Dental Condition Name",
    "Information About the Condition",
    "Severity Percentage",
    "Home Cure or Remedy",
    "Dietary Options or Food Solutions",
    "Call for Action",
];

/// The six diagnosis fields, accumulated as space-joined lines.
///
/// Values keep a trailing space per appended line; callers trim when
/// assembling the final report context.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiagnosisSections {
    pub condition: String,
    pub information: String,
    pub severity: String,
    pub remedy: String,
    pub diet: String,
    pub action: String,
}

impl DiagnosisSections {
    fn field_mut(&mut self, idx: usize) -> &mut String {
        match idx {
            0 => &mut self.condition,
            1 => &mut self.information,
            2 => &mut self.severity,
            3 => &mut self.remedy,
            4 => &mut self.diet,
            _ => &mut self.action,
        }
    }
}

/// Splits the aggregated analysis text into the six named sections.
///
/// With multiple images the text contains repeated headings; later
/// occurrences append to the same field, concatenating the per-image
/// answers. Text before the first recognized heading is dropped.
pub fn parse_sections(text: &str) -> DiagnosisSections {
    let mut sections = DiagnosisSections::default();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(idx) = HEADERS.iter().position(|h| *h == line) {
            current = Some(idx);
        } else if let Some(idx) = current {
            let field = sections.field_mut(idx);
            field.push_str(line);
            field.push(' ');
        }
    }

    sections
}

/// Header line prepended to each per-image model answer before
/// aggregation.
pub fn analysis_header(image_number: usize) -> String {
    format!("\n--- Analysis for Image {image_number} ---\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_six_sections() {
        let text = "\n--- Analysis for Image 1 ---\n\
Dental Condition Name\nDental Caries\n\
Information About the Condition\nDemineralization of enamel.\nProgresses without care.\n\
Severity Percentage\n72%\n\
Home Cure or Remedy\nSaltwater rinses.\n\
Dietary Options or Food Solutions\nReduce sugar intake.\n\
Call for Action\nSee a dentist within two weeks.\n";

        let s = parse_sections(text);
        assert_eq!(s.condition, "Dental Caries ");
        assert_eq!(
            s.information,
            "Demineralization of enamel. Progresses without care. "
        );
        assert_eq!(s.severity, "72% ");
        assert_eq!(s.remedy, "Saltwater rinses. ");
        assert_eq!(s.diet, "Reduce sugar intake. ");
        assert_eq!(s.action, "See a dentist within two weeks. ");
    }

    #[test]
    fn repeated_headings_append_across_images() {
        let text = "Dental Condition Name\nCaries\n\
--- Analysis for Image 2 ---\n\
Dental Condition Name\nGingivitis\n";

        // The separator line is not a heading, so it lands in the section
        // that is still open when it appears.
        let s = parse_sections(text);
        assert_eq!(s.condition, "Caries --- Analysis for Image 2 --- Gingivitis ");
    }

    #[test]
    fn decorated_heading_does_not_open_a_section() {
        // A markdown-styled heading is treated as body text of the section
        // that is currently open, and opens nothing when none is.
        let s = parse_sections("**Dental Condition Name**\nCaries\n");
        assert_eq!(s, DiagnosisSections::default());

        let s = parse_sections("Severity Percentage\n80%\n**Call for Action**\nGo now\n");
        assert_eq!(s.severity, "80% **Call for Action** Go now ");
        assert_eq!(s.action, "");
    }

    #[test]
    fn text_before_first_heading_is_dropped() {
        let s = parse_sections("Hello patient.\nDental Condition Name\nCaries\n");
        assert_eq!(s.condition, "Caries ");
    }

    #[test]
    fn prompt_lists_every_heading() {
        for h in HEADERS {
            assert!(CLINICAL_PROMPT.contains(h));
        }
    }
}
