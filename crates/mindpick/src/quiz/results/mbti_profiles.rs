use super::spec::ResultSpec;

/// Built-in description of one MBTI type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MbtiProfile {
    pub code: &'static str,
    pub summary: &'static str,
    pub desc: &'static str,
}

pub const GENERIC_SUMMARY: &str = "MBTI result";

pub const MBTI_PROFILES: [MbtiProfile; 16] = [
    MbtiProfile {
        code: "ISTJ",
        summary: "The dependable inspector",
        desc: "Responsible, realistic and methodical in getting things done.",
    },
    MbtiProfile {
        code: "ISFJ",
        summary: "The devoted defender",
        desc: "Attentive and warm, happiest when helping others.",
    },
    MbtiProfile {
        code: "INFJ",
        summary: "The insightful advocate",
        desc: "Perceptive and guided by strong personal values.",
    },
    MbtiProfile {
        code: "INTJ",
        summary: "The deliberate architect",
        desc: "A strategist who turns vision into a concrete plan.",
    },
    MbtiProfile {
        code: "ISTP",
        summary: "The versatile virtuoso",
        desc: "A practical problem solver with a curious streak.",
    },
    MbtiProfile {
        code: "ISFP",
        summary: "The curious artist",
        desc: "Flexible, gentle and rich in feeling.",
    },
    MbtiProfile {
        code: "INFP",
        summary: "The passionate mediator",
        desc: "Idealistic with a deep capacity for empathy.",
    },
    MbtiProfile {
        code: "INTP",
        summary: "The logical thinker",
        desc: "An analytical mind that loves to ask why.",
    },
    MbtiProfile {
        code: "ESTP",
        summary: "The daring entrepreneur",
        desc: "Realistic, bold and driven to act.",
    },
    MbtiProfile {
        code: "ESFP",
        summary: "The free-spirited entertainer",
        desc: "Sociable and full of energy.",
    },
    MbtiProfile {
        code: "ENFP",
        summary: "The sparkling campaigner",
        desc: "Creative and overflowing with enthusiasm.",
    },
    MbtiProfile {
        code: "ENTP",
        summary: "The lively debater",
        desc: "Enjoys challenge, argument and change.",
    },
    MbtiProfile {
        code: "ESTJ",
        summary: "The strict executive",
        desc: "Practical and logical, values order and procedure.",
    },
    MbtiProfile {
        code: "ESFJ",
        summary: "The sociable consul",
        desc: "Considerate and cooperative at heart.",
    },
    MbtiProfile {
        code: "ENFJ",
        summary: "The principled protagonist",
        desc: "Empathetic with a natural gift for leadership.",
    },
    MbtiProfile {
        code: "ENTJ",
        summary: "The bold commander",
        desc: "Decisive and focused on reaching the goal.",
    },
];

pub fn profile(code: &str) -> Option<&'static MbtiProfile> {
    let code = code.trim().to_uppercase();
    MBTI_PROFILES.iter().find(|profile| profile.code == code)
}

/// `{ id, title, summary, desc }` for an MBTI-shaped type.
pub fn synthesize(code: &str) -> ResultSpec {
    let code = code.trim().to_uppercase();
    let (summary, desc) = profile(&code)
        .map(|profile| (profile.summary, profile.desc))
        .unwrap_or((GENERIC_SUMMARY, ""));

    ResultSpec::default()
        .with("id", code.as_str())
        .with("title", code.as_str())
        .with("summary", summary)
        .with("desc", desc)
}
