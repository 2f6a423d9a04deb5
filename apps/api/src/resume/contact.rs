use serde::{Deserialize, Serialize};

use crate::resume::sanitize::sanitize;
use crate::resume::sections::ResumeSections;

/// Section the model is asked to open the resume with.
pub const CONTACT_SECTION: &str = "CONTACT INFORMATION";

const PLACEHOLDER_NAME: &str = "Name";
const PLACEHOLDER_EMAIL: &str = "email@example.com";
const PLACEHOLDER_PHONE: &str = "Phone";

/// Name and contact details printed in the full-width header of the PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBlock {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Default for ContactBlock {
    fn default() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            email: PLACEHOLDER_EMAIL.to_string(),
            phone: PLACEHOLDER_PHONE.to_string(),
        }
    }
}

impl ContactBlock {
    /// Reads a block laid out as
    ///
    /// ```text
    /// Full Name
    /// email@example.com | +1234567890
    /// ```
    ///
    /// Returns `None` when there is no non-blank first line.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Option<Self> {
        let mut lines = lines
            .iter()
            .map(|l| l.as_ref().trim())
            .filter(|l| !l.is_empty());

        let name = lines.next()?.to_string();
        let (email, phone) = match lines.next() {
            Some(contact) => match contact.split_once('|') {
                Some((email, phone)) => (email.trim().to_string(), phone.trim().to_string()),
                None => (contact.to_string(), String::new()),
            },
            None => (String::new(), String::new()),
        };

        Some(Self { name, email, phone })
    }

    /// Picks the contact block for a resume: the generated `CONTACT
    /// INFORMATION` section first, then the contact text the user submitted,
    /// then placeholders.
    pub fn resolve(sections: &ResumeSections, submitted: Option<&str>) -> Self {
        sections
            .get(CONTACT_SECTION)
            .and_then(Self::from_lines)
            .or_else(|| {
                submitted.and_then(|text| Self::from_lines(&text.lines().collect::<Vec<_>>()))
            })
            .unwrap_or_default()
    }

    /// `email | phone`, skipping whichever part is blank.
    pub fn details_line(&self) -> String {
        [self.email.as_str(), self.phone.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Copy with every field passed through [`sanitize`].
    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize(&self.name),
            email: sanitize(&self.email),
            phone: sanitize(&self.phone),
        }
    }
}
