use crate::message::{Entry, Role};

/// Append-only conversational state threaded through rounds.
///
/// Entry order is the only ordering signal the model gateway consumes; the
/// transcript is seeded once with a `system` entry and only ever grows.
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn seeded(system_prompt: impl Into<String>) -> Self {
        Self {
            entries: vec![Entry::system(system_prompt)],
        }
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the prompt payload: `<role>: <text>` per entry, newline-joined,
    /// in insertion order.
    pub fn render_prompt(&self) -> String {
        let mut prompt = String::new();
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                prompt.push('\n');
            }
            prompt.push_str(entry.role.as_str());
            prompt.push_str(": ");
            prompt.push_str(&entry.text);
        }
        prompt
    }

    pub fn last_of(&self, role: Role) -> Option<&Entry> {
        self.entries.iter().rev().find(|entry| entry.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_with_a_single_system_entry() {
        let transcript = Transcript::seeded("be brief");

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.entries()[0], Entry::system("be brief"));
    }

    #[test]
    fn renders_role_prefixed_lines_in_insertion_order() {
        let mut transcript = Transcript::seeded("sys");
        transcript.push(Entry::user("hi"));
        transcript.push(Entry::tool(r#"{"content":"x"}"#));
        transcript.push(Entry::assistant("done"));

        assert_eq!(
            transcript.render_prompt(),
            "system: sys\nuser: hi\ntool: {\"content\":\"x\"}\nassistant: done"
        );
    }

    #[test]
    fn last_of_finds_most_recent_entry_for_role() {
        let mut transcript = Transcript::seeded("sys");
        transcript.push(Entry::user("first"));
        transcript.push(Entry::user("second"));

        assert_eq!(
            transcript.last_of(Role::User).map(|e| e.text.as_str()),
            Some("second")
        );
        assert!(transcript.last_of(Role::Assistant).is_none());
    }
}
