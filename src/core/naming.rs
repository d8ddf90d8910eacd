//! Conversation titles and the file names derived from them.

use std::collections::HashSet;

use super::models::{Conversation, ConversationKind};

/// Human-readable title for a conversation.
///
/// Group conversations with a declared name use it verbatim. Everything else
/// joins the participants' labels with `", "` in list order, without sorting
/// or deduplication.
///
/// # Example
///
/// ```rust
/// use hangpack::core::models::{Conversation, ConversationKind, Participant};
/// use hangpack::core::conversation_name;
///
/// let conv = Conversation {
///     id: "c1".into(),
///     kind: ConversationKind::Group,
///     declared_name: None,
///     participants: vec![
///         Participant::new("1", Some("Alice".into())),
///         Participant::new("2", None),
///     ],
///     events: vec![],
/// };
/// assert_eq!(conversation_name(&conv), "Alice, 2");
/// ```
pub fn conversation_name(conversation: &Conversation) -> String {
    if conversation.kind == ConversationKind::Group {
        if let Some(name) = &conversation.declared_name {
            return name.clone();
        }
    }

    conversation
        .participants
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Replaces separator characters so a conversation name can be used as a file stem.
///
/// `", "` is replaced before `","` so a joined participant list becomes
/// `Alice-Bob` rather than `Alice- Bob`.
pub fn sanitize_filename(name: &str) -> String {
    name.replace(", ", "-").replace(',', "-").replace('/', "-")
}

/// Hands out distinct `.csv` file names for one export run.
///
/// A name that was already issued gets ` (2)`, ` (3)`, ... until it is free,
/// so two conversations never write to the same file. Names are compared
/// case-insensitively because `Bob.csv` and `bob.csv` are the same file on
/// case-insensitive filesystems.
#[derive(Debug, Default)]
pub struct FileNamer {
    issued: HashSet<String>,
}

impl FileNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// File name for `conversation`, titled `name`.
    ///
    /// Falls back to the conversation id when the sanitized name is empty.
    pub fn file_name(&mut self, conversation: &Conversation, name: &str) -> String {
        let mut stem = sanitize_filename(name);
        if stem.trim().is_empty() {
            stem = sanitize_filename(&conversation.id);
        }

        let mut candidate = format!("{stem}.csv");
        let mut suffix = 1;
        while !self.issued.insert(candidate.to_lowercase()) {
            suffix += 1;
            candidate = format!("{stem} ({suffix}).csv");
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Participant;

    fn conversation(kind: ConversationKind, declared: Option<&str>) -> Conversation {
        Conversation {
            id: "Ugw123".into(),
            kind,
            declared_name: declared.map(String::from),
            participants: vec![
                Participant::new("1", Some("Alice".into())),
                Participant::new("2", Some("Bob".into())),
                Participant::new("3", None),
            ],
            events: vec![],
        }
    }

    #[test]
    fn test_group_with_declared_name() {
        let conv = conversation(ConversationKind::Group, Some("Weekend, plans"));
        assert_eq!(conversation_name(&conv), "Weekend, plans");
    }

    #[test]
    fn test_group_without_name_falls_back() {
        let conv = conversation(ConversationKind::Group, None);
        assert_eq!(conversation_name(&conv), "Alice, Bob, 3");
    }

    #[test]
    fn test_one_to_one_ignores_declared_name() {
        let conv = conversation(ConversationKind::OneToOne, Some("ignored"));
        assert_eq!(conversation_name(&conv), "Alice, Bob, 3");
    }

    #[test]
    fn test_no_dedup_no_sort() {
        let mut conv = conversation(ConversationKind::OneToOne, None);
        conv.participants = vec![
            Participant::new("2", Some("Zed".into())),
            Participant::new("1", Some("Zed".into())),
        ];
        assert_eq!(conversation_name(&conv), "Zed, Zed");
    }

    #[test]
    fn test_empty_participants() {
        let mut conv = conversation(ConversationKind::OneToOne, None);
        conv.participants.clear();
        assert_eq!(conversation_name(&conv), "");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Alice, Bob"), "Alice-Bob");
        assert_eq!(sanitize_filename("a,b/c"), "a-b-c");
        assert_eq!(sanitize_filename("plain"), "plain");
    }

    #[test]
    fn test_file_namer_dedup_and_fallback() {
        let conv = conversation(ConversationKind::Group, None);
        let mut namer = FileNamer::new();
        assert_eq!(namer.file_name(&conv, "Alice, Bob"), "Alice-Bob.csv");
        assert_eq!(namer.file_name(&conv, "Alice,Bob"), "Alice-Bob (2).csv");
        assert_eq!(namer.file_name(&conv, ""), "Ugw123.csv");
    }

    #[test]
    fn test_file_namer_skips_issued_suffixed_name() {
        let conv = conversation(ConversationKind::Group, None);
        let mut namer = FileNamer::new();
        assert_eq!(namer.file_name(&conv, "A"), "A.csv");
        assert_eq!(namer.file_name(&conv, "A"), "A (2).csv");
        assert_eq!(namer.file_name(&conv, "A (2)"), "A (2) (2).csv");
        assert_eq!(namer.file_name(&conv, "A"), "A (3).csv");
    }

    #[test]
    fn test_file_namer_ignores_case() {
        let conv = conversation(ConversationKind::Group, None);
        let mut namer = FileNamer::new();
        assert_eq!(namer.file_name(&conv, "Bob"), "Bob.csv");
        assert_eq!(namer.file_name(&conv, "bob"), "bob (2).csv");
    }
}
