//! Contact module - directory records as the engine sees them

use std::fmt;

/// Opaque identifier for a contact in the remote directory.
///
/// The directory owns id assignment; the engine only compares and
/// displays them. Zero is reserved as "no contact" and rejected by
/// request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactId(u64);

impl ContactId {
    /// Wrap a raw directory id.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable snapshot of a directory contact.
///
/// Contacts are fetched, never created, by this system. `subtypes` is the
/// (possibly empty) set of subtype names the directory reports for the
/// contact; matching against target subtypes is exact string comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Directory identifier
    pub id: ContactId,

    /// Human-readable name for display
    pub display_name: String,

    /// Name the directory sorts by; the scan order key
    pub sort_name: String,

    /// Primary email, when the directory has one
    pub email: Option<String>,

    /// Contact type, e.g. "Individual" or "Organization"
    pub contact_type: String,

    /// Subtype names carried by this contact
    pub subtypes: Vec<String>,
}

impl Contact {
    /// Whether this contact carries the given subtype.
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtypes.iter().any(|s| s == subtype)
    }
}

/// A minimal reference to a contact, used inside match evidence where a
/// full snapshot would be redundant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRef {
    /// Directory identifier
    pub id: ContactId,

    /// Human-readable name for display
    pub display_name: String,
}

impl From<&Contact> for ContactRef {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            display_name: contact.display_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(subtypes: &[&str]) -> Contact {
        Contact {
            id: ContactId::new(7),
            display_name: "Ada Lovelace".to_string(),
            sort_name: "Lovelace, Ada".to_string(),
            email: None,
            contact_type: "Individual".to_string(),
            subtypes: subtypes.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_has_subtype() {
        let c = contact(&["Employer", "Partner"]);
        assert!(c.has_subtype("Employer"));
        assert!(!c.has_subtype("Vendor"));
    }

    #[test]
    fn test_has_subtype_empty() {
        assert!(!contact(&[]).has_subtype("Employer"));
    }

    #[test]
    fn test_contact_ref_from_contact() {
        let c = contact(&[]);
        let r = ContactRef::from(&c);
        assert_eq!(r.id, c.id);
        assert_eq!(r.display_name, "Ada Lovelace");
    }

    #[test]
    fn test_contact_id_display() {
        assert_eq!(ContactId::new(42).to_string(), "42");
    }
}
