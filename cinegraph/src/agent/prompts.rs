//! Prompt templates for the three model-backed stages.

use crate::tools::ToolDescriptor;

/// Context placeholder when retrieval produced nothing.
pub const NO_CONTEXT: &str = "No context available";

/// Tool-results placeholder when no tool ran.
pub const NO_TOOLS_USED: &str = "No tools were used.";

/// Response marker meaning the model wants no tool.
pub const NO_TOOL_NEEDED: &str = "NO_TOOL_NEEDED";

pub fn analyze_query(query: &str) -> String {
    format!(
        "Analyze this query and determine:
1. Is it asking about movies in our database?
2. Does it require graph traversal?
3. Does it need external information?
4. Does it require calculations?

Query: {query}

Provide a brief analysis and reasoning."
    )
}

/// `- name: description` per tool, one per line.
pub fn tool_list(tools: &[ToolDescriptor]) -> String {
    tools
        .iter()
        .map(|t| format!("- {}: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn select_tool(tools: &[ToolDescriptor], query: &str, context: &str) -> String {
    format!(
        "You are an AI assistant with access to these tools:
{tools}

Query: {query}
Context from knowledge graph: {context}

Decide which tool to use and provide the input.
If no tool is needed, say \"{NO_TOOL_NEEDED}\".

Format: TOOL_NAME: input",
        tools = tool_list(tools),
    )
}

pub fn generate_answer(query: &str, graph_context: &str, tool_results: &str) -> String {
    format!(
        "You are a helpful movie recommendation assistant.

User Query: {query}

Knowledge Graph Context:
{graph_context}

Tool Results:
{tool_results}

Reformulate the gathered information into a natural, high-quality answer.
- Use **bold** for movie titles or ratings.
- Provide a concise summary (under 2-3 sentences).
- **ONLY** include a specific list (Director, Cast, etc.) if the user explicitly asked for those details or if the query is a formal request for movie specifications.
- If creating a list, use bullet points (*) on NEW LINES.

Example (General Query):
The movie **Interstellar** is a sci-fi epic rated **8.6**, following a team of explorers through a wormhole to save humanity.

Example (Specific Request):
**Interstellar** details:
* **Director**: Christopher Nolan
* **Cast**: Matthew McConaughey, Anne Hathaway"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_tool_lists_every_descriptor() {
        let tools = vec![
            ToolDescriptor {
                name: "graph_query".into(),
                description: "Run Cypher.".into(),
            },
            ToolDescriptor {
                name: "calculator".into(),
                description: "Do math.".into(),
            },
        ];
        let p = select_tool(&tools, "how many?", "Movie: Heat");
        assert!(p.contains("- graph_query: Run Cypher.\n- calculator: Do math."));
        assert!(p.contains("Query: how many?"));
        assert!(p.contains("Context from knowledge graph: Movie: Heat"));
        assert!(p.contains("\"NO_TOOL_NEEDED\""));
    }

    #[test]
    fn generate_answer_embeds_all_parts() {
        let p = generate_answer("q", NO_CONTEXT, NO_TOOLS_USED);
        assert!(p.contains("User Query: q"));
        assert!(p.contains("Knowledge Graph Context:\nNo context available"));
        assert!(p.contains("Tool Results:\nNo tools were used."));
    }
}
