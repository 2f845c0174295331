//! Template-type determination and combination expansion
//!
//! One collected answer set can contain list answers (multi-select
//! questions). Rendering wants one concrete answer map per output file set,
//! so the list answers are expanded into their Cartesian product - except
//! that a hierarchically tagged selection pins its parent question to the
//! parent value it was presented under, instead of being crossed against
//! unrelated parent values.

use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use crate::answers::{Answer, Answers};
use crate::choices::Choice;
use crate::config::QuestionGraph;
use crate::error::{Error, Result};

/// One fully-resolved answer set, used to render exactly one file set
pub type Combination = Answers;

/// Multi-select answers keyed by question key, in graph order
pub type MultiValues = BTreeMap<String, Vec<String>>;

/// Determine the template name and collect multi-select answers
///
/// The template name comes from the configured `template_question` when
/// present; otherwise the first single-select answer in question order is
/// used as a backward-compatibility heuristic (and warned about, since
/// reordering questions silently changes its result).
pub fn determine_template_and_multi_values(
    graph: &QuestionGraph,
    answers: &Answers,
) -> Result<(String, MultiValues)> {
    let mut multi_values = MultiValues::new();
    for (key, spec) in graph.iter() {
        if spec.is_multiple() {
            if let Some(answer) = answers.get(key) {
                multi_values.insert(key.to_string(), answer.values().to_vec());
            }
        }
    }

    let template_name = match graph.template_question() {
        Some(key) => {
            let answer = answers
                .get(key)
                .ok_or_else(|| Error::TemplateQuestionUnanswered {
                    question: key.to_string(),
                })?;
            answer
                .as_single()
                .ok_or_else(|| Error::TemplateQuestionNotScalar {
                    question: key.to_string(),
                })?
                .to_string()
        }
        None => {
            let (key, name) = graph
                .iter()
                .filter(|(_, spec)| !spec.is_multiple())
                .find_map(|(key, _)| {
                    answers
                        .get(key)
                        .and_then(Answer::as_single)
                        .map(|value| (key, value.to_string()))
                })
                .ok_or(Error::NoTemplateType)?;
            warn!(
                "No template_question configured; falling back to the first \
                 single-select answer '{key}' as the template name"
            );
            name
        }
    };

    Ok((template_name, multi_values))
}

/// Expand multi-select answers into all combinations to render
///
/// With no multi-select answers the base answer set is the single
/// combination. Otherwise each multi question contributes partial answer
/// maps - `{question: value}` for a plain selection, or
/// `{parent: parent_value, question: child_value}` for a tagged one - and the
/// Cartesian product of those lists is merged into the base. A parent
/// question referenced by any child's tags is pinned: it contributes no axis
/// of its own, and an untagged selection of such a child expands against
/// every parent value so the parent still resolves to one value per
/// combination. Enumeration
/// order follows the deterministic map order of the multi questions, but
/// callers should only rely on the combination *set*.
pub fn expand_combinations(
    graph: &QuestionGraph,
    base: &Answers,
    multi_values: &MultiValues,
) -> Vec<Combination> {
    if multi_values.is_empty() {
        return vec![base.clone()];
    }

    // Parse selections per multi question, recovering hierarchical tags
    let parsed: Vec<(&String, Option<&str>, Vec<Choice>)> = multi_values
        .iter()
        .map(|(key, selections)| {
            let parent_key = graph.get(key).and_then(|spec| spec.parent_key());
            let choices = selections
                .iter()
                .map(|raw| Choice::from_display(raw, parent_key))
                .collect();
            (key, parent_key, choices)
        })
        .collect();

    // A parent pinned by its child's tags contributes no axis of its own;
    // crossing it against the tagged pairs would recreate the very
    // (parent, child) combinations the tagging exists to rule out
    let pinned_parents: HashSet<String> = parsed
        .iter()
        .flat_map(|(_, _, choices)| choices.iter())
        .filter_map(|choice| choice.parent.as_ref().map(|p| p.key.clone()))
        .collect();

    // Per multi question: one list of partial answer maps. A tagged choice
    // carries its own parent value; an untagged choice whose parent is
    // pinned must still fix the parent, so it fans out over the parent's
    // selections
    let partials: Vec<Vec<Vec<(String, String)>>> = parsed
        .into_iter()
        .filter(|(key, _, _)| !pinned_parents.contains(key.as_str()))
        .map(|(key, parent_key, choices)| {
            let pinned_values = parent_key
                .filter(|p| pinned_parents.contains(*p))
                .and_then(|p| multi_values.get(p).map(|values| (p, values)));

            let mut list = Vec::new();
            for choice in choices {
                match choice.parent {
                    Some(parent) => list.push(vec![
                        (parent.key, parent.value),
                        (key.clone(), choice.value),
                    ]),
                    None => match pinned_values {
                        Some((parent, values)) => {
                            for value in values {
                                list.push(vec![
                                    (parent.to_string(), value.clone()),
                                    (key.clone(), choice.value.clone()),
                                ]);
                            }
                        }
                        None => list.push(vec![(key.clone(), choice.value)]),
                    },
                }
            }
            list
        })
        .collect();

    let mut combinations = Vec::new();
    let mut current: Vec<(String, String)> = Vec::new();
    product(&partials, 0, &mut current, base, &mut combinations);
    combinations
}

fn product(
    partials: &[Vec<Vec<(String, String)>>],
    index: usize,
    current: &mut Vec<(String, String)>,
    base: &Answers,
    out: &mut Vec<Combination>,
) {
    if index == partials.len() {
        let mut combination = base.clone();
        for (key, value) in current.iter() {
            combination.insert(key.clone(), Answer::Single(value.clone()));
        }
        out.push(combination);
        return;
    }

    for partial in &partials[index] {
        current.extend(partial.iter().cloned());
        product(partials, index + 1, current, base, out);
        current.truncate(current.len() - partial.len());
    }
}
