//! Flattening of raw dataset records into display-ready patient records.
//!
//! Normalisation runs once when the directory is built. The resulting records
//! are never mutated afterwards.

use crate::constants::{MISSING_ADDRESS, PATIENT_ID_PREFIX};
use crate::dataset::RawPatient;
use directory_types::IssueColor;
use serde::Serialize;

/// A flat patient record as served by the directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Display identifier, e.g. `ID-0001`.
    pub id: String,
    pub name: String,
    pub age: u32,
    /// Issue text with each word capitalised.
    pub issue: String,
    pub issue_color: IssueColor,
    /// First contact address, or `N/A`.
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Normalise raw records, preserving their order.
pub fn normalize(raw: Vec<RawPatient>) -> Vec<PatientRecord> {
    raw.into_iter().map(normalize_record).collect()
}

fn normalize_record(raw: RawPatient) -> PatientRecord {
    let contact = raw.primary_contact().cloned().unwrap_or_default();
    let issue = capitalize_words(&raw.medical_issue);
    let issue_color = IssueColor::for_issue(&issue);

    PatientRecord {
        id: format_patient_id(raw.patient_id),
        name: raw.patient_name,
        age: raw.age,
        issue,
        issue_color,
        address: contact.address.unwrap_or_else(|| MISSING_ADDRESS.to_string()),
        phone: contact.number,
        email: contact.email,
    }
}

/// Format a numeric id as `ID-` followed by at least four zero-padded digits.
pub fn format_patient_id(id: u32) -> String {
    format!("{PATIENT_ID_PREFIX}{id:04}")
}

/// Upper-case the first character of every space-delimited word.
///
/// The remainder of each word is kept as is, and runs of spaces survive.
pub fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RawContact;

    fn raw(id: u32, issue: &str, contact: Vec<RawContact>) -> RawPatient {
        RawPatient {
            patient_id: id,
            patient_name: format!("Patient {id}"),
            age: 40,
            photo_url: None,
            contact,
            medical_issue: issue.to_string(),
        }
    }

    #[test]
    fn formats_padded_ids() {
        assert_eq!(format_patient_id(1), "ID-0001");
        assert_eq!(format_patient_id(42), "ID-0042");
        assert_eq!(format_patient_id(1234), "ID-1234");
        assert_eq!(format_patient_id(12345), "ID-12345");
    }

    #[test]
    fn capitalises_each_word_only_at_first_character() {
        assert_eq!(capitalize_words("sore throat"), "Sore Throat");
        assert_eq!(capitalize_words("fEVER"), "FEVER");
        assert_eq!(capitalize_words("broken  arm"), "Broken  Arm");
        assert_eq!(capitalize_words(""), "");
        assert_eq!(capitalize_words("ßtomach ache"), "SStomach Ache");
    }

    #[test]
    fn uses_first_contact_and_fills_defaults() {
        let records = normalize(vec![
            raw(
                7,
                "sprained ankle",
                vec![
                    RawContact {
                        address: Some("57 Northnort Pass".into()),
                        number: Some("672-425-6691".into()),
                        email: None,
                    },
                    RawContact {
                        address: Some("second".into()),
                        number: Some("000".into()),
                        email: Some("second@example.org".into()),
                    },
                ],
            ),
            raw(8, "rash", vec![]),
        ]);

        let first = &records[0];
        assert_eq!(first.id, "ID-0007");
        assert_eq!(first.issue, "Sprained Ankle");
        assert_eq!(first.issue_color, IssueColor::Green);
        assert_eq!(first.address, "57 Northnort Pass");
        assert_eq!(first.phone.as_deref(), Some("672-425-6691"));
        assert_eq!(first.email, None);

        let second = &records[1];
        assert_eq!(second.address, MISSING_ADDRESS);
        assert_eq!(second.phone, None);
        assert_eq!(second.email, None);
        assert_eq!(second.issue_color, IssueColor::Pink);
    }

    #[test]
    fn preserves_input_order() {
        let records = normalize(vec![
            raw(3, "fever", vec![]),
            raw(1, "fever", vec![]),
            raw(2, "fever", vec![]),
        ]);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["ID-0003", "ID-0001", "ID-0002"]);
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let records = normalize(vec![raw(1, "fever", vec![])]);
        let json = serde_json::to_value(&records[0]).expect("serialise record");
        assert_eq!(json["issueColor"], "red");
        assert_eq!(json["address"], "N/A");
        assert!(json["email"].is_null());
    }
}
