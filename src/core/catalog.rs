//! # Content Catalog
//!
//! The read-only tree of educational content:
//!
//! ```text
//! Catalog
//! ├── subjects: Vec<Subject>
//! │   ├── Menu   → levels: Vec<Level>
//! │   │            └── modules: vocab / speaking / grammar / phonics
//! │   │                 └── ModuleContent (NotAuthored | Empty | Questions | Units | Speaking)
//! │   └── Direct → questions: Vec<Question>
//! ├── shop: Vec<ShopItem>
//! └── leaderboard: Vec<RosterEntry>
//! ```
//!
//! The built-in catalog is embedded from `assets/catalog.toml`. An external
//! file (`.toml` or `.json`) can replace it at startup. Everything is
//! validated once on load, so the reducer can index into it without
//! re-checking `correct_answer` bounds.
//!
//! Session state never copies catalog nodes. It stores indices and resolves
//! them through the accessors here.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.toml");

/// Text shown when a question-list module has nothing authored yet.
pub const PLACEHOLDER_EXPLANATION: &str = "Under construction.";

// ============================================================================
// Catalog Types
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Catalog {
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub shop: Vec<ShopItem>,
    #[serde(default)]
    pub leaderboard: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Subject {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub content: SubjectContent,
}

/// A subject either drills down into levels or runs its own quiz.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubjectContent {
    Menu { levels: Vec<Level> },
    Direct {
        #[serde(default)]
        questions: Vec<Question>,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Level {
    pub id: String,
    pub grade: String,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub modules: LevelModules,
}

/// The fixed set of skill modules every level offers.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LevelModules {
    #[serde(default)]
    pub vocab: ModuleContent,
    #[serde(default)]
    pub speaking: ModuleContent,
    #[serde(default)]
    pub grammar: ModuleContent,
    #[serde(default)]
    pub phonics: ModuleContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    Vocab,
    Speaking,
    Grammar,
    Phonics,
}

impl ModuleId {
    /// Display order on the skill menu.
    pub const ALL: [ModuleId; 4] = [
        ModuleId::Vocab,
        ModuleId::Speaking,
        ModuleId::Grammar,
        ModuleId::Phonics,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ModuleId::Vocab => "vocab",
            ModuleId::Speaking => "speaking",
            ModuleId::Grammar => "grammar",
            ModuleId::Phonics => "phonics",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ModuleId::Vocab => "Vocab & Sentence",
            ModuleId::Speaking => "Speaking & Reading",
            ModuleId::Grammar => "Grammar",
            ModuleId::Phonics => "Phonics",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// What a level holds for one module.
///
/// `NotAuthored` and `Empty` are kept apart: a missing key in the catalog
/// file is `NotAuthored`, an explicit `kind = "empty"` is `Empty`. For
/// question-list modules both lead to the placeholder question.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleContent {
    #[default]
    NotAuthored,
    Empty,
    Questions {
        questions: Vec<Question>,
    },
    Units {
        units: Vec<Unit>,
    },
    Speaking(SpeakingContent),
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Unit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Unit {
    /// "Unit 8: Possessive Nouns" → "Unit 8"
    pub fn short_title(&self) -> &str {
        self.title.split(':').next().unwrap_or(&self.title).trim()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    Standard,
    /// Shows an illustration and reads the answer aloud.
    VisualAudio,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<QuestionOption>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub kind: QuestionKind,
    #[serde(default)]
    pub visual: Option<String>,
    #[serde(default)]
    pub correct_sentence: Option<String>,
}

impl Question {
    /// The single stand-in question used when a module has no content yet.
    pub fn placeholder(module: ModuleId) -> Self {
        Self {
            id: "mock".to_string(),
            prompt: format!("[{}] Content coming soon!", module.id()),
            options: vec![QuestionOption::Label("OK".to_string())],
            correct_answer: 0,
            explanation: PLACEHOLDER_EXPLANATION.to_string(),
            kind: QuestionKind::Standard,
            visual: None,
            correct_sentence: None,
        }
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_answer
    }

    /// What gets read aloud after the user answers.
    pub fn spoken_feedback(&self, chosen: usize) -> Option<&str> {
        self.correct_sentence
            .as_deref()
            .or_else(|| self.options.get(chosen).map(QuestionOption::display_label))
    }
}

/// An answer choice: a bare label, or a descriptor carrying a name and icon.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum QuestionOption {
    Label(String),
    Descriptor(OptionDescriptor),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct OptionDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl QuestionOption {
    pub fn display_label(&self) -> &str {
        match self {
            QuestionOption::Label(label) => label,
            QuestionOption::Descriptor(d) => d.name.as_deref().unwrap_or("Option"),
        }
    }

    /// Stable key used by the listening game to compare guesses.
    pub fn key(&self) -> &str {
        match self {
            QuestionOption::Label(label) => label,
            QuestionOption::Descriptor(d) => d
                .id
                .as_deref()
                .or(d.name.as_deref())
                .unwrap_or("Option"),
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            QuestionOption::Label(_) => None,
            QuestionOption::Descriptor(d) => d.icon.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SpeakingContent {
    pub read_aloud: ReadAloud,
    pub listening_game: ListeningGame,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ReadAloud {
    pub title: String,
    #[serde(default)]
    pub level: String,
    pub text: String,
    #[serde(default)]
    pub translation: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ListeningGame {
    pub title: String,
    #[serde(default)]
    pub intro: String,
    pub clues: Vec<ListeningClue>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ListeningClue {
    pub id: String,
    pub sound_text: String,
    pub correct_animal: String,
    pub options: Vec<QuestionOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Sticker,
    Gif,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub price: u32,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RosterEntry {
    pub rank: u32,
    pub name: String,
    /// Student id, e.g. "S-888".
    pub id: String,
    pub points: u32,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub is_user: bool,
}

// ============================================================================
// Active Question Set
// ============================================================================

/// Where the questions of the running quiz come from.
///
/// Holds indices into the catalog rather than copies. The only owned
/// question is the synthesized placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionSource {
    Subject {
        subject: usize,
    },
    Module {
        subject: usize,
        level: usize,
        module: ModuleId,
    },
    Unit {
        subject: usize,
        level: usize,
        unit: usize,
    },
    Placeholder(Box<Question>),
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    UnsupportedFormat(PathBuf),
    Invalid(Vec<String>),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "catalog I/O error: {e}"),
            CatalogError::Toml(e) => write!(f, "catalog TOML error: {e}"),
            CatalogError::Json(e) => write!(f, "catalog JSON error: {e}"),
            CatalogError::UnsupportedFormat(path) => write!(
                f,
                "unsupported catalog format: {} (expected .toml or .json)",
                path.display()
            ),
            CatalogError::Invalid(problems) => {
                write!(f, "catalog failed validation: {}", problems.join("; "))
            }
        }
    }
}

impl std::error::Error for CatalogError {}

// ============================================================================
// Loading
// ============================================================================

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(contents).map_err(CatalogError::Toml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(contents).map_err(CatalogError::Json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file, picking the parser from the extension.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let contents = fs::read_to_string(path).map_err(CatalogError::Io)?;
        let catalog = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };
        info!("Loaded catalog from {}", path.display());
        Ok(catalog)
    }

    /// Check every invariant the reducer relies on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut problems = Vec::new();

        let mut subject_ids = HashSet::new();
        for subject in &self.subjects {
            if !subject_ids.insert(subject.id.as_str()) {
                problems.push(format!("duplicate subject id '{}'", subject.id));
            }
            match &subject.content {
                SubjectContent::Direct { questions } => {
                    check_questions(&subject.id, questions, &mut problems);
                }
                SubjectContent::Menu { levels } => {
                    for level in levels {
                        check_level(&subject.id, level, &mut problems);
                    }
                }
            }
        }

        let mut item_ids = HashSet::new();
        for item in &self.shop {
            if !item_ids.insert(item.id.as_str()) {
                problems.push(format!("duplicate shop item '{}'", item.id));
            }
        }

        if !self.leaderboard.is_empty() {
            let users = self.leaderboard.iter().filter(|e| e.is_user).count();
            if users != 1 {
                problems.push(format!(
                    "leaderboard must flag exactly one current user, found {users}"
                ));
            }
        }

        if problems.is_empty() {
            debug!("Catalog validated: {}", self.summary());
            Ok(())
        } else {
            Err(CatalogError::Invalid(problems))
        }
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut summary = CatalogSummary {
            subjects: self.subjects.len(),
            shop_items: self.shop.len(),
            roster: self.leaderboard.len(),
            ..Default::default()
        };
        for subject in &self.subjects {
            match &subject.content {
                SubjectContent::Direct { questions } => summary.questions += questions.len(),
                SubjectContent::Menu { levels } => {
                    summary.levels += levels.len();
                    for level in levels {
                        for module in ModuleId::ALL {
                            match level.module(module) {
                                ModuleContent::Questions { questions } => {
                                    summary.questions += questions.len()
                                }
                                ModuleContent::Units { units } => {
                                    summary.units += units.len();
                                    summary.questions +=
                                        units.iter().map(|u| u.questions.len()).sum::<usize>();
                                }
                                _ => {}
                            }
                        }
                    }
                }
            }
        }
        summary
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn subject(&self, index: usize) -> Option<&Subject> {
        self.subjects.get(index)
    }

    pub fn level(&self, subject: usize, level: usize) -> Option<&Level> {
        self.subject(subject)?.levels().get(level)
    }

    pub fn unit(&self, subject: usize, level: usize, unit: usize) -> Option<&Unit> {
        self.level(subject, level)?.units().get(unit)
    }

    pub fn shop_item(&self, id: &str) -> Option<&ShopItem> {
        self.shop.iter().find(|item| item.id == id)
    }

    /// Resolve the active question set. Dangling indices resolve to an
    /// empty slice, which the quiz screen shows as "no questions".
    pub fn questions<'a>(&'a self, source: &'a QuestionSource) -> &'a [Question] {
        match source {
            QuestionSource::Subject { subject } => match self.subject(*subject) {
                Some(Subject {
                    content: SubjectContent::Direct { questions },
                    ..
                }) => questions.as_slice(),
                _ => &[],
            },
            QuestionSource::Module {
                subject,
                level,
                module,
            } => match self.level(*subject, *level).map(|l| l.module(*module)) {
                Some(ModuleContent::Questions { questions }) => questions.as_slice(),
                _ => &[],
            },
            QuestionSource::Unit {
                subject,
                level,
                unit,
            } => self
                .unit(*subject, *level, *unit)
                .map(|u| u.questions.as_slice())
                .unwrap_or(&[]),
            QuestionSource::Placeholder(question) => std::slice::from_ref(&**question),
        }
    }
}

impl Subject {
    pub fn is_menu(&self) -> bool {
        matches!(self.content, SubjectContent::Menu { .. })
    }

    pub fn levels(&self) -> &[Level] {
        match &self.content {
            SubjectContent::Menu { levels } => levels,
            SubjectContent::Direct { .. } => &[],
        }
    }
}

impl Level {
    pub fn module(&self, id: ModuleId) -> &ModuleContent {
        match id {
            ModuleId::Vocab => &self.modules.vocab,
            ModuleId::Speaking => &self.modules.speaking,
            ModuleId::Grammar => &self.modules.grammar,
            ModuleId::Phonics => &self.modules.phonics,
        }
    }

    pub fn units(&self) -> &[Unit] {
        match &self.modules.grammar {
            ModuleContent::Units { units } => units,
            _ => &[],
        }
    }

    pub fn speaking(&self) -> Option<&SpeakingContent> {
        match &self.modules.speaking {
            ModuleContent::Speaking(content) => Some(content),
            _ => None,
        }
    }
}

/// Counts printed by `--check-catalog`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub subjects: usize,
    pub levels: usize,
    pub units: usize,
    pub questions: usize,
    pub shop_items: usize,
    pub roster: usize,
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} subjects, {} levels, {} units, {} questions, {} shop items, {} roster entries",
            self.subjects, self.levels, self.units, self.questions, self.shop_items, self.roster
        )
    }
}

// ============================================================================
// Validation helpers
// ============================================================================

fn check_level(subject_id: &str, level: &Level, problems: &mut Vec<String>) {
    let scope = format!("{subject_id}/{}", level.id);
    for module in ModuleId::ALL {
        let module_scope = format!("{scope}/{module}");
        match level.module(module) {
            ModuleContent::Questions { questions } => {
                check_questions(&module_scope, questions, problems)
            }
            ModuleContent::Units { units } => {
                let mut unit_ids = HashSet::new();
                for unit in units {
                    if !unit_ids.insert(unit.id.as_str()) {
                        problems.push(format!("{module_scope}: duplicate unit id '{}'", unit.id));
                    }
                    check_questions(
                        &format!("{module_scope}/{}", unit.id),
                        &unit.questions,
                        problems,
                    );
                }
            }
            ModuleContent::Speaking(content) => {
                for clue in &content.listening_game.clues {
                    if !clue.options.iter().any(|o| o.key() == clue.correct_animal) {
                        problems.push(format!(
                            "{module_scope}/{}: answer '{}' is not among the options",
                            clue.id, clue.correct_animal
                        ));
                    }
                }
            }
            ModuleContent::NotAuthored | ModuleContent::Empty => {}
        }
    }
}

fn check_questions(scope: &str, questions: &[Question], problems: &mut Vec<String>) {
    let mut ids = HashSet::new();
    for question in questions {
        if !ids.insert(question.id.as_str()) {
            problems.push(format!("{scope}: duplicate question id '{}'", question.id));
        }
        if question.options.is_empty() {
            problems.push(format!("{scope}/{}: no options", question.id));
        } else if question.correct_answer >= question.options.len() {
            problems.push(format!(
                "{scope}/{}: correct_answer {} out of range for {} options",
                question.id,
                question.correct_answer,
                question.options.len()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english(catalog: &Catalog) -> usize {
        catalog
            .subjects
            .iter()
            .position(|s| s.id == "english_hub")
            .unwrap()
    }

    #[test]
    fn test_builtin_catalog_loads_and_validates() {
        let catalog = Catalog::builtin().unwrap();
        let ids: Vec<&str> = catalog.subjects.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["english_hub", "biology", "math_whiz", "social_studies"]
        );
        assert_eq!(catalog.shop.len(), 6);
        assert_eq!(catalog.leaderboard.len(), 6);
    }

    #[test]
    fn test_builtin_levels_and_modules() {
        let catalog = Catalog::builtin().unwrap();
        let subject = catalog.subject(english(&catalog)).unwrap();
        assert!(subject.is_menu());
        let codes: Vec<&str> = subject.levels().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(
            codes,
            vec!["lvl_a", "lvl_p", "lvl_l", "lvl_u", "lvl_s", "lvl_j"]
        );

        let grade_one = &subject.levels()[0];
        assert!(matches!(
            grade_one.module(ModuleId::Vocab),
            ModuleContent::Questions { questions } if questions.len() == 1
        ));
        assert!(grade_one.speaking().is_none());
        assert!(grade_one.units().is_empty());

        let grade_two = &subject.levels()[1];
        assert!(grade_two.speaking().is_some());
        let unit_ids: Vec<&str> = grade_two.units().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(unit_ids, vec!["unit_8", "unit_9", "unit_10", "review_1"]);
        assert_eq!(grade_two.units()[0].questions.len(), 4);
    }

    #[test]
    fn test_missing_module_is_not_authored() {
        let toml_str = r#"
[[subjects]]
id = "english_hub"
title = "English"
[subjects.content]
type = "menu"
[[subjects.content.levels]]
id = "lvl_x"
grade = "Grade 9"
code = "Level X"
title = "Sparse"
[subjects.content.levels.modules.phonics]
kind = "empty"
"#;
        let catalog = Catalog::from_toml_str(toml_str).unwrap();
        let level = catalog.level(0, 0).unwrap();
        assert_eq!(level.module(ModuleId::Vocab), &ModuleContent::NotAuthored);
        assert_eq!(level.module(ModuleId::Phonics), &ModuleContent::Empty);
    }

    #[test]
    fn test_display_label_fallbacks() {
        let label = QuestionOption::Label("Apple".to_string());
        let named = QuestionOption::Descriptor(OptionDescriptor {
            id: Some("bird".to_string()),
            name: Some("Bird".to_string()),
            icon: None,
        });
        let bare = QuestionOption::Descriptor(OptionDescriptor::default());
        assert_eq!(label.display_label(), "Apple");
        assert_eq!(named.display_label(), "Bird");
        assert_eq!(bare.display_label(), "Option");
        assert_eq!(named.key(), "bird");
    }

    #[test]
    fn test_mixed_options_deserialize() {
        let json = r#"{"id":"q","prompt":"?","options":["A",{"name":"B"},{}],"correct_answer":1}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        let labels: Vec<&str> = question.options.iter().map(|o| o.display_label()).collect();
        assert_eq!(labels, vec!["A", "B", "Option"]);
        assert_eq!(question.kind, QuestionKind::Standard);
    }

    #[test]
    fn test_validation_rejects_out_of_range_answer() {
        let toml_str = r#"
[[subjects]]
id = "math"
title = "Math"
[subjects.content]
type = "direct"
[[subjects.content.questions]]
id = "m1"
prompt = "1 + 1?"
options = ["1", "2"]
correct_answer = 2
"#;
        match Catalog::from_toml_str(toml_str) {
            Err(CatalogError::Invalid(problems)) => {
                assert_eq!(problems.len(), 1);
                assert!(problems[0].contains("out of range"));
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_requires_single_current_user() {
        let toml_str = r#"
[[subjects]]
id = "math"
title = "Math"
[subjects.content]
type = "direct"

[[leaderboard]]
rank = 1
name = "A"
id = "S-1"
points = 10
"#;
        assert!(matches!(
            Catalog::from_toml_str(toml_str),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_json_catalog_loads() {
        let json = r#"{
            "subjects": [{
                "id": "math_whiz",
                "title": "Math",
                "content": {"type": "direct", "questions": [
                    {"id": "m1", "prompt": "?", "options": ["a", "b"], "correct_answer": 1}
                ]}
            }]
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let source = QuestionSource::Subject { subject: 0 };
        assert_eq!(catalog.questions(&source).len(), 1);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("eduquest-catalog-test.yaml");
        fs::write(&path, "subjects: []").unwrap();
        let result = Catalog::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(CatalogError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_questions_resolution() {
        let catalog = Catalog::builtin().unwrap();
        let english = english(&catalog);

        let unit = QuestionSource::Unit {
            subject: english,
            level: 1,
            unit: 0,
        };
        assert_eq!(catalog.questions(&unit)[0].id, "u8_q1");

        let vocab = QuestionSource::Module {
            subject: english,
            level: 1,
            module: ModuleId::Vocab,
        };
        assert_eq!(catalog.questions(&vocab).len(), 3);

        let placeholder = QuestionSource::Placeholder(Box::new(Question::placeholder(
            ModuleId::Phonics,
        )));
        let questions = catalog.questions(&placeholder);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt, "[phonics] Content coming soon!");

        let dangling = QuestionSource::Unit {
            subject: english,
            level: 40,
            unit: 0,
        };
        assert!(catalog.questions(&dangling).is_empty());
    }

    #[test]
    fn test_spoken_feedback_prefers_correct_sentence() {
        let catalog = Catalog::builtin().unwrap();
        let unit = catalog.unit(english(&catalog), 1, 0).unwrap();
        assert_eq!(
            unit.questions[0].spoken_feedback(2),
            Some("My brother's name is Leo.")
        );
        let placeholder = Question::placeholder(ModuleId::Vocab);
        assert_eq!(placeholder.spoken_feedback(0), Some("OK"));
        assert_eq!(unit.short_title(), "Unit 8");
    }

    #[test]
    fn test_summary_counts() {
        let summary = Catalog::builtin().unwrap().summary();
        assert_eq!(summary.subjects, 4);
        assert_eq!(summary.levels, 6);
        assert_eq!(summary.units, 4);
        // 3 direct + 1 (lvl_a vocab) + 3 (lvl_p vocab) + 16 grammar
        assert_eq!(summary.questions, 23);
    }
}
