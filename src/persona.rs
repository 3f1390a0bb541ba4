//! Expert personas and their system instructions.
//!
//! The instruction strings are sent verbatim as the system message. The
//! resolver is total: anything that is not one of the three selectable
//! personas gets the generic expert.

// ── Instructions ──────────────────────────────────────────────────────────────

pub const ECONOMIST_INSTRUCTIONS: &str = "\
あなたは経済学の専門家です。マクロ経済・金融政策・産業動向に詳しく、\
専門用語をわかりやすく説明できます。";

pub const PHYSICIAN_INSTRUCTIONS: &str = "\
あなたは臨床経験豊富な医師です。健康や病気の質問に対し、\
一般的な医学知識に基づいて正確で分かりやすい説明を行います。";

pub const ENGINEER_INSTRUCTIONS: &str = "\
あなたはソフトウェアエンジニアです。プログラミング・システム設計・\
AI/機械学習に詳しく、コード例や設計方針を丁寧に解説します。";

pub const GENERALIST_INSTRUCTIONS: &str =
    "あなたは一般的な専門家として、分かりやすく回答してください。";

// ── Persona ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    Economist,
    Physician,
    Engineer,
    /// Fallback for unrecognized labels. Never offered in the UI.
    Generalist,
}

impl Persona {
    /// Selectable personas, in display order.
    pub const RECOGNIZED: [Persona; 3] = [Persona::Economist, Persona::Physician, Persona::Engineer];

    /// Number of distinct personas, fallback included.
    pub const COUNT: usize = 4;

    /// Resolve a label. Accepts the English slug (case-insensitive) or the
    /// Japanese display label; surrounding whitespace is ignored.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::RECOGNIZED
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(label) || p.label() == label)
            .unwrap_or(Persona::Generalist)
    }

    pub fn slug(self) -> &'static str {
        match self {
            Persona::Economist => "economist",
            Persona::Physician => "physician",
            Persona::Engineer => "engineer",
            Persona::Generalist => "generalist",
        }
    }

    /// Display label shown on the form.
    pub fn label(self) -> &'static str {
        match self {
            Persona::Economist => "経済学者",
            Persona::Physician => "医師",
            Persona::Engineer => "エンジニア",
            Persona::Generalist => "専門家",
        }
    }

    pub fn instructions(self) -> &'static str {
        match self {
            Persona::Economist => ECONOMIST_INSTRUCTIONS,
            Persona::Physician => PHYSICIAN_INSTRUCTIONS,
            Persona::Engineer => ENGINEER_INSTRUCTIONS,
            Persona::Generalist => GENERALIST_INSTRUCTIONS,
        }
    }

    /// Dense index into per-persona tables.
    pub(crate) fn index(self) -> usize {
        match self {
            Persona::Economist => 0,
            Persona::Physician => 1,
            Persona::Engineer => 2,
            Persona::Generalist => 3,
        }
    }
}

/// Map any label to its system instruction.
pub fn resolve_instructions(label: &str) -> &'static str {
    Persona::from_label(label).instructions()
}
