// Prompt text for resume generation.
// The instruction block is never shown to the user; it fixes the section
// names the layout engine places into columns.

/// Fixed resume-writer instructions sent ahead of every submission.
pub const RESUME_WRITER_PROMPT: &str = r#"You are an expert resume writer. Create a professional, ATS-friendly resume following this exact format:

CONTACT INFORMATION
[Full Name]
[Email] | [Phone]

The resume should have two columns:

Left column sections (in order):
- EDUCATION (with university name, degree, year, location, GPA)
- SKILLS (technical skills, programming languages)
- COURSEWORK (relevant courses)
- ACHIEVEMENTS (bullet points)
- LINKS (Github, LinkedIn)

Right column sections (in order):
- EXPERIENCE (with company name, position, dates)
  - Use bullet points for responsibilities and achievements
  - Focus on quantifiable achievements and technical details
  - Use action verbs and specific technologies
- PROJECTS (with detailed technical descriptions)
  - Include technologies used
  - Highlight technical challenges solved
  - Mention scale and impact

Use consistent formatting:
- ALL CAPS for section headers
- Bullet points for lists
- Clear hierarchy of information
- Concise, technical language
- Focus on relevant skills and technologies for the job description"#;

/// Builds the full prompt for one submission. User text is inserted in a
/// single pass, so braces in it are passed through untouched.
pub fn compose_prompt(contact_info: &str, instructions: &str, job_description: &str) -> String {
    format!(
        "{RESUME_WRITER_PROMPT}\n\n\
         Contact Information:\n{contact_info}\n\n\
         Additional Instructions:\n{instructions}\n\n\
         Job Description:\n{job_description}\n\n\
         Generate the resume based on the above."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_prompt_layout() {
        let prompt = compose_prompt(
            "Jane Doe\njane@example.com | 555-0100",
            "Keep it to one page",
            "Backend engineer, Rust",
        );
        assert!(prompt.starts_with("You are an expert resume writer."));
        assert!(prompt.contains(
            "Contact Information:\nJane Doe\njane@example.com | 555-0100\n\nAdditional Instructions:\nKeep it to one page\n\nJob Description:\nBackend engineer, Rust\n\nGenerate the resume based on the above."
        ));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_user_text_with_braces_is_kept_verbatim() {
        let prompt = compose_prompt(
            "Jane {instructions}",
            "use {job_description} keywords",
            "JD {contact_info}",
        );
        assert!(prompt.contains("Contact Information:\nJane {instructions}\n\n"));
        assert!(prompt.contains("Additional Instructions:\nuse {job_description} keywords\n\n"));
        assert!(prompt.contains("Job Description:\nJD {contact_info}\n\n"));
    }

    #[test]
    fn test_prompt_names_every_column_section() {
        for section in ["EDUCATION", "SKILLS", "COURSEWORK", "ACHIEVEMENTS", "LINKS", "EXPERIENCE", "PROJECTS"] {
            assert!(RESUME_WRITER_PROMPT.contains(section), "missing {section}");
        }
    }
}
