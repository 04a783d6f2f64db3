//! Prompt template registry.
//!
//! A closed set of templates, one per [`Mode`]. Each embeds its own persona
//! and rule set around the same two inputs: the user query (quoted) and the
//! numbered retrieved-message block.

use maskrag_core::mode::Mode;
use maskrag_core::prompt::Prompt;

use super::compiler::compile;

/// A named prompt-building strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptTemplate {
    General,
    PrivateFinance,
    Learning,
}

impl PromptTemplate {
    /// Every template, in registry order.
    pub const ALL: [PromptTemplate; 3] = [
        PromptTemplate::General,
        PromptTemplate::PrivateFinance,
        PromptTemplate::Learning,
    ];

    /// Registry lookup: the template serving `mode`.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::General => PromptTemplate::General,
            Mode::PrivateFinance => PromptTemplate::PrivateFinance,
            Mode::Learning => PromptTemplate::Learning,
        }
    }

    /// The mode this template serves.
    pub fn mode(&self) -> Mode {
        match self {
            PromptTemplate::General => Mode::General,
            PromptTemplate::PrivateFinance => Mode::PrivateFinance,
            PromptTemplate::Learning => Mode::Learning,
        }
    }

    /// One-line description of the persona.
    pub fn persona(&self) -> &'static str {
        match self {
            PromptTemplate::General => "General-purpose assistant that answers concisely",
            PromptTemplate::PrivateFinance => {
                "Financial reasoning assistant bound by a strict non-disclosure contract"
            }
            PromptTemplate::Learning => "Step-by-step tutor using simple language",
        }
    }

    /// Build the prompt for `query` and `messages`.
    pub fn build<S: AsRef<str>>(&self, query: &str, messages: &[S]) -> Prompt {
        compile(*self, query, messages)
    }

    /// Render the untrimmed template text around an already rendered block.
    pub(crate) fn render(&self, query: &str, retrieved_block: &str) -> String {
        match self {
            PromptTemplate::General => general(query, retrieved_block),
            PromptTemplate::PrivateFinance => private_finance(query, retrieved_block),
            PromptTemplate::Learning => learning(query, retrieved_block),
        }
    }
}

fn general(query: &str, retrieved_block: &str) -> String {
    format!(
        r#"
You are a helpful general-purpose assistant.

RULES:
- Answer the user's question concisely.
- Do not fabricate facts, names, numbers, dates, or sources.
- Use the retrieved messages only if they help answer the question.
- Tokens that start with # (such as #amount or #date) are masked values. Keep them exactly as written.

USER QUERY:
"{query}"

RETRIEVED MESSAGES:
{retrieved_block}

Give a short, accurate answer.
"#
    )
}

fn private_finance(query: &str, retrieved_block: &str) -> String {
    format!(
        r#"
You are a financial reasoning assistant for a privacy-preserving RAG system.
You work under a strict non-disclosure contract: the data you see is masked, and the real values must stay hidden.

IMPORTANT RULES:
- The text contains masked entities like #amount, #receiver, #date.
- These placeholders MUST remain EXACTLY as they appear.
- NEVER replace, modify, create, or remove placeholders.
- NEVER infer or guess the real value behind a placeholder.
- Never hallucinate real names, numbers, dates, or apps.
- Only summarize or compute using the placeholders given.
- Ignore messages that do NOT contain an #amount placeholder if the question is about payments.
- If the total cannot be calculated because the placeholders are the same, say so.

USER QUERY:
"{query}"

RETRIEVED MESSAGES:
{retrieved_block}

TASK:
- If the user query is natural conversation, respond naturally; you may neglect the retrieved messages.
- Identify which messages represent payments.
- Use only the placeholders to calculate. Never turn a placeholder into a number.
- If multiple different #amount placeholders exist, express the total symbolically, e.g. (#amount + #amount).
- If the same placeholder repeats, do not add it to itself. Say:
  "Both payments use the placeholder #amount, so the total cannot be calculated."

Give the final answer in 1–2 sentences.
"#
    )
}

fn learning(query: &str, retrieved_block: &str) -> String {
    format!(
        r#"
You are a patient tutor who explains ideas step by step.

RULES:
- Use simple language and short steps.
- Examples are welcome when they make an idea clearer.
- The retrieved messages are optional context. Disregard them if they are not relevant.
- Tokens that start with # (such as #amount or #date) are masked values. Keep them exactly as written.

USER QUERY:
"{query}"

RETRIEVED MESSAGES:
{retrieved_block}

Explain your answer step by step.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskrag_core::placeholder;

    const PAYMENTS: [&str; 2] = ["Sent #amount1 for rent", "Sent #amount2 for groceries"];

    #[test]
    fn registry_is_bijective_with_modes() {
        for mode in Mode::ALL {
            assert_eq!(PromptTemplate::for_mode(mode).mode(), mode);
        }
        assert_eq!(PromptTemplate::ALL.len(), Mode::ALL.len());
    }

    #[test]
    fn personas_are_distinct() {
        let texts: Vec<String> = PromptTemplate::ALL
            .iter()
            .map(|t| t.build("q", &PAYMENTS).into_string())
            .collect();
        assert_ne!(texts[0], texts[1]);
        assert_ne!(texts[1], texts[2]);
        assert_ne!(texts[0], texts[2]);
        assert!(texts[0].starts_with("You are a helpful general-purpose assistant."));
        assert!(texts[1].starts_with("You are a financial reasoning assistant"));
        assert!(texts[2].starts_with("You are a patient tutor"));
    }

    #[test]
    fn every_template_embeds_query_and_block() {
        for template in PromptTemplate::ALL {
            let prompt = template.build("What's the total?", &PAYMENTS);
            let text = prompt.as_str();
            assert!(text.contains("USER QUERY:\n\"What's the total?\""));
            assert!(text.contains(
                "RETRIEVED MESSAGES:\n1. \"Sent #amount1 for rent\"\n2. \"Sent #amount2 for groceries\""
            ));
        }
    }

    #[test]
    fn placeholders_survive_verbatim_in_every_mode() {
        let query = "Did #receiver_name get #amount on #date?";
        let messages = ["Paid #amount to #receiver on #date", "Refund #amount_2 (#ref)"];
        for template in PromptTemplate::ALL {
            let text = template.build(query, &messages).into_string();
            for source in std::iter::once(query).chain(messages) {
                for token in placeholder::find_all(source) {
                    assert!(text.contains(token), "{token} missing in {template:?}");
                }
                assert!(text.contains(source));
            }
        }
    }

    #[test]
    fn finance_rules_cover_repeat_and_symbolic_totals() {
        let text = PromptTemplate::PrivateFinance.build("What's the total?", &PAYMENTS).into_string();
        assert!(text.contains("NEVER replace, modify, create, or remove placeholders."));
        assert!(text.contains("NEVER infer or guess the real value behind a placeholder."));
        assert!(text.contains("do NOT contain an #amount placeholder"));
        assert!(text.contains("(#amount + #amount)"));
        assert!(text.contains(
            "Both payments use the placeholder #amount, so the total cannot be calculated."
        ));
        assert!(text.ends_with("Give the final answer in 1–2 sentences."));
    }

    #[test]
    fn general_and_learning_carry_their_own_rules() {
        let general = PromptTemplate::General.build("hi", &PAYMENTS).into_string();
        assert!(general.contains("Answer the user's question concisely."));
        assert!(general.contains("only if they help"));
        assert!(!general.contains("non-disclosure"));

        let learning = PromptTemplate::Learning.build("hi", &PAYMENTS).into_string();
        assert!(learning.contains("simple language"));
        assert!(learning.contains("Examples are welcome"));
        assert!(learning.contains("Disregard them if they are not relevant."));
        assert!(!learning.contains("(#amount + #amount)"));
    }
}
