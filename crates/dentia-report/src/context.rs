use chrono::NaiveDate;

use dentia_core::models::PatientProfile;

use crate::sections::DiagnosisSections;

/// The flat set of values substituted into the report document. Everything
/// is rendered as text; missing profile data collapses to "N/A".
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub date_of_birth: String,
    pub age: String,
    pub contact_number: String,
    pub address: String,
    pub symptoms: String,
    pub previous_treatments: String,
    pub brushing_frequency: String,
    pub tobacco_use: String,
    pub condition: String,
    pub severity: String,
    pub info: String,
    pub remedy: String,
    pub diet: String,
    pub action: String,
}

/// Whole years between `dob` and `today`, decremented by one when the
/// birthday has not yet occurred this year.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> i32 {
    use chrono::Datelike;
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Maps a stored truthy value to "Yes"/"No". Accepts the historical string
/// encodings "1", "true" and "yes" (case-insensitive); anything else,
/// including an absent value, is "No".
pub fn yes_no(raw: &str) -> &'static str {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => "Yes",
        _ => "No",
    }
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

impl ReportContext {
    pub fn build(profile: &PatientProfile, sections: &DiagnosisSections, today: NaiveDate) -> Self {
        let age = match profile.date_of_birth {
            Some(dob) => calculate_age(dob, today).to_string(),
            None => "N/A".to_string(),
        };
        let tobacco_raw = profile
            .tobacco_use
            .map(|b| b.to_string())
            .unwrap_or_default();

        ReportContext {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            gender: or_na(profile.gender.as_deref()),
            date_of_birth: profile
                .date_of_birth
                .map(|d| d.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            age,
            contact_number: or_na(profile.contact_number.as_deref()),
            address: or_na(profile.address.as_deref()),
            symptoms: profile.symptoms.join(", "),
            previous_treatments: profile.previous_treatments.join(", "),
            brushing_frequency: or_na(profile.brushing_frequency.as_deref()),
            tobacco_use: yes_no(&tobacco_raw).to_string(),
            condition: sections.condition.trim().to_string(),
            severity: sections.severity.trim().to_string(),
            info: sections.information.trim().to_string(),
            remedy: sections.remedy.trim().to_string(),
            diet: sections.diet.trim().to_string(),
            action: sections.action.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile() -> PatientProfile {
        PatientProfile {
            first_name: "Amina".to_string(),
            last_name: "Rahman".to_string(),
            email: "amina@example.com".to_string(),
            gender: Some("female".to_string()),
            date_of_birth: Some(date(2000, 6, 15)),
            contact_number: None,
            address: Some("7 Mill Lane".to_string()),
            symptoms: vec!["Toothache".to_string(), "Swelling".to_string()],
            previous_treatments: vec![],
            brushing_frequency: Some("twice daily".to_string()),
            tobacco_use: Some(true),
        }
    }

    #[test]
    fn age_decrements_before_birthday() {
        let dob = date(2000, 6, 15);
        assert_eq!(calculate_age(dob, date(2024, 6, 14)), 23);
        assert_eq!(calculate_age(dob, date(2024, 6, 15)), 24);
        assert_eq!(calculate_age(dob, date(2024, 6, 16)), 24);
    }

    #[test]
    fn tobacco_truthy_table() {
        for raw in ["1", "true", "True", "TRUE", "yes", "Yes", "YES"] {
            assert_eq!(yes_no(raw), "Yes", "raw={raw}");
        }
        for raw in ["", "0", "false", "no", "sometimes", "2"] {
            assert_eq!(yes_no(raw), "No", "raw={raw}");
        }
    }

    #[test]
    fn build_fills_patient_fields() {
        let sections = DiagnosisSections {
            condition: "Dental Caries ".to_string(),
            severity: "72% ".to_string(),
            ..Default::default()
        };
        let ctx = ReportContext::build(&profile(), &sections, date(2024, 6, 14));

        assert_eq!(ctx.age, "23");
        assert_eq!(ctx.date_of_birth, "2000-06-15");
        assert_eq!(ctx.contact_number, "N/A");
        assert_eq!(ctx.symptoms, "Toothache, Swelling");
        assert_eq!(ctx.previous_treatments, "");
        assert_eq!(ctx.tobacco_use, "Yes");
        assert_eq!(ctx.condition, "Dental Caries");
        assert_eq!(ctx.severity, "72%");
    }

    #[test]
    fn build_without_dob_uses_sentinel() {
        let mut p = profile();
        p.date_of_birth = None;
        p.tobacco_use = None;
        let ctx = ReportContext::build(&p, &DiagnosisSections::default(), date(2024, 1, 1));

        assert_eq!(ctx.age, "N/A");
        assert_eq!(ctx.date_of_birth, "N/A");
        assert_eq!(ctx.tobacco_use, "No");
    }
}
