use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// The qualification sub-profile: three fixed academic records plus the
// ranked exam-city preference. All values are kept as strings, exactly as
// the wizard submits them (years and percentages included).
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualificationDetails {
    pub matriculation: SchoolRecord,
    pub intermediate: IntermediateRecord,
    pub iti: TradeRecord,
    pub exam_city_preference: ExamCityPreference,
}

impl QualificationDetails {
    pub fn is_empty(&self) -> bool {
        self.matriculation.is_empty()
            && self.intermediate.is_empty()
            && self.iti.is_empty()
            && self.exam_city_preference.is_empty()
    }
}

/// Matriculation (class 10) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolRecord {
    pub board_name: Option<String>,
    pub year_of_passing: Option<String>,
    pub roll_number: Option<String>,
    pub percentage: Option<String>,
    pub subjects: Option<String>,
}

impl SchoolRecord {
    pub fn is_empty(&self) -> bool {
        self.board_name.is_none()
            && self.year_of_passing.is_none()
            && self.roll_number.is_none()
            && self.percentage.is_none()
            && self.subjects.is_none()
    }
}

/// Intermediate (class 12) record; carries a stream on top of the school
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntermediateRecord {
    pub board_name: Option<String>,
    pub year_of_passing: Option<String>,
    pub roll_number: Option<String>,
    pub percentage: Option<String>,
    pub subjects: Option<String>,
    pub stream: Option<String>,
}

impl IntermediateRecord {
    pub fn is_empty(&self) -> bool {
        self.board_name.is_none()
            && self.year_of_passing.is_none()
            && self.roll_number.is_none()
            && self.percentage.is_none()
            && self.subjects.is_none()
            && self.stream.is_none()
    }
}

/// Vocational (ITI) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeRecord {
    pub institute_name: Option<String>,
    pub year_of_passing: Option<String>,
    pub roll_number: Option<String>,
    pub percentage: Option<String>,
    pub trade: Option<String>,
    pub duration: Option<String>,
}

impl TradeRecord {
    pub fn is_empty(&self) -> bool {
        self.institute_name.is_none()
            && self.year_of_passing.is_none()
            && self.roll_number.is_none()
            && self.percentage.is_none()
            && self.trade.is_none()
            && self.duration.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExamCityPreference {
    pub city1: Option<String>,
    pub city2: Option<String>,
    pub city3: Option<String>,
}

impl ExamCityPreference {
    pub fn is_empty(&self) -> bool {
        self.city1.is_none() && self.city2.is_none() && self.city3.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness_tracks_any_section() {
        let mut details = QualificationDetails::default();
        assert!(details.is_empty());

        details.exam_city_preference.city1 = Some("Nagpur".to_string());
        assert!(!details.is_empty());
    }

    #[test]
    fn partial_payload_defaults_other_records() {
        let payload = serde_json::json!({
            "matriculation": {
                "boardName": "State Board",
                "yearOfPassing": "2014",
                "percentage": "81.4"
            }
        });

        let details: QualificationDetails = serde_json::from_value(payload).unwrap();
        assert_eq!(details.matriculation.board_name.as_deref(), Some("State Board"));
        assert!(details.intermediate.is_empty());
        assert!(details.iti.is_empty());
        assert!(details.exam_city_preference.is_empty());
    }
}
