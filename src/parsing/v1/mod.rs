use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    curriculum::Curriculum,
    models::{Lesson, Module},
    validator::{Rule, RuleSet, Validator},
};

use super::ParsingError;

/// A single validation rule. Exactly one of `contains` or `matches` must be
/// set.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct JsonRuleV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct JsonValidatorV1 {
    #[serde(deserialize_with = "no_empty_vec")]
    pub rules: Vec<JsonRuleV1>,
    #[serde(default)]
    pub hints: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct JsonLessonV1 {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub validator: Option<JsonValidatorV1>,
    #[serde(default)]
    pub solution: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct JsonModuleV1 {
    pub title: String,
    #[serde(deserialize_with = "no_empty_vec")]
    pub lessons: Vec<JsonLessonV1>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct JsonCurriculumV1 {
    pub version: String,
    pub title: String,
    #[serde(deserialize_with = "no_empty_vec")]
    pub modules: Vec<JsonModuleV1>,
}

pub fn no_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    use serde::de::Error;
    let v: Vec<T> = Deserialize::deserialize(deserializer)?;
    if v.is_empty() {
        Err(Error::custom("empty arrays are not allowed"))
    } else {
        Ok(v)
    }
}

impl JsonRuleV1 {
    fn into_rule(self, lesson: &str) -> Result<Rule, ParsingError> {
        match (self.contains, self.matches) {
            (Some(needle), None) => Ok(Rule::contains(needle)),
            (None, Some(pattern)) => Rule::matches(&pattern).map_err(|source| {
                ParsingError::PatternError { lesson: lesson.to_string(), source }
            }),
            _ => Err(ParsingError::CurriculumFmtError(format!(
                "rule in lesson '{lesson}' must set exactly one of 'contains' \
                 or 'matches'"
            ))),
        }
    }
}

impl TryFrom<JsonLessonV1> for Lesson {
    type Error = ParsingError;

    fn try_from(lesson: JsonLessonV1) -> Result<Self, Self::Error> {
        let JsonLessonV1 { title, content, validator, solution } = lesson;

        let validator = validator
            .map(|JsonValidatorV1 { rules, hints }| {
                rules
                    .into_iter()
                    .map(|rule| rule.into_rule(&title))
                    .collect::<Result<Vec<_>, _>>()
                    .map(|rules| {
                        Validator::from(RuleSet::new(rules).with_hints(hints))
                    })
            })
            .transpose()?;

        Ok(Self { title, content, validator, solution })
    }
}

impl TryFrom<JsonCurriculumV1> for Curriculum {
    type Error = ParsingError;

    fn try_from(curriculum: JsonCurriculumV1) -> Result<Self, Self::Error> {
        let JsonCurriculumV1 { title, modules, .. } = curriculum;

        let modules = modules
            .into_iter()
            .map(|JsonModuleV1 { title, lessons }| {
                lessons
                    .into_iter()
                    .map(Lesson::try_from)
                    .collect::<Result<Vec<_>, _>>()
                    .map(|lessons| Module::new(title, lessons))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Curriculum::new(title, modules))
    }
}
