//! Fixed indicator taxonomy for performance-agreement reporting.
//!
//! The taxonomy is defined by the PA evaluation framework, not by this
//! system: three domains plus the challenge agreement, fifteen indicators in
//! total. Records reference indicators by id; ids are not validated against
//! this table, so a record with an unknown id still lists under its raw key.

/// One entry of the indicator taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub id: &'static str,
    pub title: &'static str,
}

pub const INDICATORS: &[Indicator] = &[
    Indicator {
        id: "challenge",
        title: "Challenge agreement",
    },
    // Domain 1: learning management
    Indicator {
        id: "d1-1",
        title: "1.1 Curriculum design and development",
    },
    Indicator {
        id: "d1-2",
        title: "1.2 Learning activity design",
    },
    Indicator {
        id: "d1-3",
        title: "1.3 Learning activity facilitation",
    },
    Indicator {
        id: "d1-4",
        title: "1.4 Media and innovation development",
    },
    Indicator {
        id: "d1-5",
        title: "1.5 Learning measurement and evaluation",
    },
    Indicator {
        id: "d1-6",
        title: "1.6 Study, analysis and synthesis",
    },
    Indicator {
        id: "d1-7",
        title: "1.7 Learning-supportive classroom climate",
    },
    Indicator {
        id: "d1-8",
        title: "1.8 Character development and coaching",
    },
    // Domain 2: support duties
    Indicator {
        id: "d2-9",
        title: "2.1 Learner information systems",
    },
    Indicator {
        id: "d2-10",
        title: "2.2 Student care and support system",
    },
    Indicator {
        id: "d2-11",
        title: "2.3 Academic and assigned duties",
    },
    Indicator {
        id: "d2-12",
        title: "2.4 Parent and community cooperation",
    },
    // Domain 3: self and professional development
    Indicator {
        id: "d3-13",
        title: "3.1 Systematic self-development",
    },
    Indicator {
        id: "d3-14",
        title: "3.2 Professional learning community participation",
    },
    Indicator {
        id: "d3-15",
        title: "3.3 Applying knowledge to practice",
    },
];

/// Display title for an indicator id, falling back to the raw id.
pub fn indicator_title(id: &str) -> &str {
    INDICATORS
        .iter()
        .find(|i| i.id == id)
        .map(|i| i.title)
        .unwrap_or(id)
}
