/// Rule-based answers used when no remote answer is available.
#[derive(Debug, Clone, Default)]
pub struct KeywordResponder;

struct KeywordRule {
    keywords: &'static [&'static str],
    answer: &'static str,
}

const RULES: [KeywordRule; 5] = [
    KeywordRule {
        keywords: &["funding", "money", "qualify"],
        answer: "Based on your query, here are some funding opportunities:\n\n\
• Conference Travel: Up to $1,500 for RSOs + $150 per presenter (max $3,000)\n\
• Individual Presenters: Up to $400\n\n\
Would you like more details about any of these?",
    },
    KeywordRule {
        keywords: &["deadline", "when"],
        answer: "Deadlines vary by resource. For Conference Travel funding, applications are \
typically reviewed on a rolling basis. I recommend checking the specific resource page for exact \
deadlines.",
    },
    KeywordRule {
        keywords: &["legal", "healthcare"],
        answer: "I can help you with both legal and healthcare resources:\n\n\
• Legal: Various legal services and support available through UCF\n\
• Healthcare: Student health services and wellness programs\n\n\
Which would you like to explore first?",
    },
    KeywordRule {
        keywords: &["rso", "organization"],
        answer: "RSOs have access to special funding and resources! Key opportunities include:\n\n\
• Conference Travel: $1,500 base + $150 per presenter\n\
• Various academic and recreational programs\n\n\
What type of RSO activity are you planning?",
    },
    KeywordRule {
        keywords: &["research", "presentation", "conference"],
        answer: "Great! For conference presentations:\n\n\
• RSOs: $1,500 + $150 per presenter (max $3,000)\n\
• Individual students: up to $400\n\n\
This covers research presentations, art shows, posters, and performances. Would you like to \
start an application?",
    },
];

const HELP_MENU: &str = "I'd be happy to help! You can ask me about:\n\n\
• Funding opportunities\n\
• Legal and healthcare resources\n\
• Conference travel support\n\
• Academic programs\n\
• Recreational activities\n\n\
What would you like to know more about?";

impl KeywordResponder {
    /// First rule whose keyword appears in the lower-cased query wins.
    pub fn respond(&self, query: &str) -> &'static str {
        let query = query.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| query.contains(keyword)))
            .map(|rule| rule.answer)
            .unwrap_or(HELP_MENU)
    }
}
