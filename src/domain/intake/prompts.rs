//! Fixed texts and prompt templates used by the intake flow.

/// Reply to the start sentinel.
pub const GREETING: &str = "Hello! I'm your process consultant. To prepare a proposal for you, \
tell me about your company: what it does, which processes take up most of your team's time, \
and which tools you use today.";

/// Instruction given to the report writer.
pub const REPORT_INSTRUCTIONS: &str = "You act as a senior consultant in process automation and \
digital transformation. Your job is to analyse the client's case, contained in the JSON record \
below, and write a high-level consulting document. The document must explain how a comprehensive \
approach to automation, based on artificial intelligence and process redesign, can effectively \
solve the problems the client described.\n\n\
The proposal must not focus on specific technologies such as languages or frameworks. Instead, \
explain how automating the workflows resolves bottlenecks, improves productivity, professionalises \
the operation and prepares the company to scale.\n\n\
Include sections such as: Strategic Diagnosis, Proposed Solution, Expected Benefits, and \
Recommendations for a Deeper Analysis. The language must be clear, professional and focused on \
impact and results. This is not a sales or technical pitch; it is a specialised consulting report.\n\n\
Use at least 10 paragraphs of fluent prose. The document must be readable by a general manager or \
a digital transformation lead.";

/// Suffix appended to a reply once the intake looks complete.
pub fn nudge_suffix(trigger_phrase: &str) -> String {
    format!(
        "\n\nI think I have enough information to prepare your proposal. \
         Type \"{}\" whenever you are ready.",
        trigger_phrase
    )
}

/// Instruction for one dialogue turn.
pub fn turn_prompt(persona: &str, context: &str, input: &str) -> String {
    format!(
        "{}\nConversation history:\n{}\nUser: {}\nAgent:",
        persona, context, input
    )
}

/// Instruction for the report writer, given the serialized conversation record.
pub fn report_prompt(record_json: &str) -> String {
    format!(
        "{}\n\nThis is the client analysis gathered so far:\n{}\n\nWrite the consulting document:",
        REPORT_INSTRUCTIONS, record_json
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::text::mentions;

    #[test]
    fn nudge_names_the_trigger_phrase() {
        let nudge = nudge_suffix("generate report");
        assert!(mentions(&nudge, "generate report"));
        assert!(nudge.starts_with("\n\n"));
    }

    #[test]
    fn turn_prompt_orders_persona_context_input() {
        let prompt = turn_prompt("PERSONA", "User: a\nAgent: b", "new question");

        let persona_at = prompt.find("PERSONA").unwrap();
        let context_at = prompt.find("User: a").unwrap();
        let input_at = prompt.find("User: new question").unwrap();

        assert!(persona_at < context_at);
        assert!(context_at < input_at);
        assert!(prompt.ends_with("Agent:"));
    }

    #[test]
    fn report_prompt_embeds_record() {
        let prompt = report_prompt("{\"history\":[]}");
        assert!(prompt.starts_with(REPORT_INSTRUCTIONS));
        assert!(prompt.contains("{\"history\":[]}"));
    }

    #[test]
    fn report_instructions_list_required_sections() {
        for section in [
            "Strategic Diagnosis",
            "Proposed Solution",
            "Expected Benefits",
            "Recommendations for a Deeper Analysis",
        ] {
            assert!(REPORT_INSTRUCTIONS.contains(section), "missing {}", section);
        }
    }

    #[test]
    fn greeting_does_not_mention_trigger() {
        assert!(!mentions(GREETING, "generate report"));
    }
}
