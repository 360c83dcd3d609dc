use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// The candidate sub-profile: everything the first wizard step collects.
// Every field is optional on the wire; a PUT replaces the whole object and
// whatever the caller omitted falls back to these defaults.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateDetails {
    pub personal_details: PersonalDetails,
    pub benchmark_disability: BenchmarkDisability,
    pub ex_servicemen: ExServicemen,
    pub government_employee: GovernmentEmployee,
    pub contract_labour: ContractLabour,
    pub correspondence_address: Address,
    pub permanent_address: PermanentAddress,
    pub dob_details: DobDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetails {
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub nationality: Option<String>,
    pub religion: Option<String>,
    pub category: Option<Category>,
}

impl PersonalDetails {
    /// No field has been filled in yet. Step progression keys off this,
    /// not off the stored completion flag.
    pub fn is_empty(&self) -> bool {
        self.father_name.is_none()
            && self.mother_name.is_none()
            && self.gender.is_none()
            && self.marital_status.is_none()
            && self.nationality.is_none()
            && self.religion.is_none()
            && self.category.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Obc,
    Sc,
    St,
    Ews,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BenchmarkDisability {
    pub is_disabled: bool,
    pub disability_type: Option<String>,
    pub disability_percentage: Option<f64>,
    pub certificate_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExServicemen {
    pub is_ex_servicemen: bool,
    pub service_number: Option<String>,
    pub rank: Option<String>,
    pub unit: Option<String>,
    pub service_from: Option<NaiveDate>,
    pub service_to: Option<NaiveDate>,
    pub discharge_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovernmentEmployee {
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub current_salary: Option<f64>,
    pub work_location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractLabour {
    pub labour_id: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub work_location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city_district: Option<String>,
    pub post_office: Option<String>,
    pub pincode: Option<String>,
    pub police_station: Option<String>,
    pub nearest_railway_station: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermanentAddress {
    pub same_as_correspondence: bool,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city_district: Option<String>,
    pub post_office: Option<String>,
    pub pincode: Option<String>,
    pub police_station: Option<String>,
    pub nearest_railway_station: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DobDetails {
    pub date_of_birth: Option<NaiveDate>,
    pub calculated_age: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_defaults_missing_fields() {
        // A wizard save carrying only personal details: every other block
        // must come back as its default shape, not an error.
        let payload = serde_json::json!({
            "personalDetails": {
                "fatherName": "R. Verma",
                "gender": "female",
                "category": "obc"
            }
        });

        let details: CandidateDetails = serde_json::from_value(payload).unwrap();
        assert_eq!(details.personal_details.father_name.as_deref(), Some("R. Verma"));
        assert_eq!(details.personal_details.gender, Some(Gender::Female));
        assert_eq!(details.personal_details.category, Some(Category::Obc));
        assert!(!details.benchmark_disability.is_disabled);
        assert!(details.correspondence_address.pincode.is_none());
        assert!(!details.permanent_address.same_as_correspondence);
    }

    #[test]
    fn stored_shape_round_trips() {
        let mut details = CandidateDetails::default();
        details.personal_details.mother_name = Some("S. Verma".to_string());
        details.dob_details.date_of_birth =
            NaiveDate::from_ymd_opt(1998, 4, 17);
        details.dob_details.calculated_age = Some(28);

        let json = serde_json::to_value(&details).unwrap();
        let back: CandidateDetails = serde_json::from_value(json).unwrap();
        assert_eq!(back, details);
    }

    #[test]
    fn empty_personal_details_detected() {
        assert!(PersonalDetails::default().is_empty());

        let filled = PersonalDetails {
            religion: Some("Hindu".to_string()),
            ..Default::default()
        };
        assert!(!filled.is_empty());
    }
}
