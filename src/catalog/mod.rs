use serde::Serialize;

/// A canned prompt offered as a one-click shortcut under the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 5] = [
    QuickAction {
        label: "Salary offer",
        prompt: "What salary should we offer a Senior DevOps Engineer?",
    },
    QuickAction {
        label: "Advance resume",
        prompt: "Should we advance this candidate's resume?",
    },
    QuickAction {
        label: "Top priority",
        prompt: "Which candidate has the highest priority?",
    },
    QuickAction {
        label: "All candidates",
        prompt: "Show me all available candidates",
    },
    QuickAction {
        label: "All jobs",
        prompt: "Show me all available jobs",
    },
];

pub fn quick_actions() -> &'static [QuickAction] {
    &QUICK_ACTIONS
}

/// Zero-based lookup.
pub fn get(index: usize) -> Option<&'static QuickAction> {
    QUICK_ACTIONS.get(index)
}
