//! Prompt construction and answer merging for chunked extraction

use serde_json::Value;

const EXTRACTION_PREAMBLE: &str = r"
You extract information from web pages. You receive one part of a page rendered as markdown, together with the URL it came from.

Follow the user's instruction exactly and use only what appears in the content. If the content holds nothing relevant to the instruction, answer with an empty list.

Answer with a JSON array of objects wrapped in <blocks></blocks> tags and nothing else.
";

/// System preamble carrying the user's instruction
pub fn build_preamble(instruction: &str) -> String {
    format!(
        "{}\n<instruction>\n{}\n</instruction>",
        EXTRACTION_PREAMBLE.trim(),
        instruction.trim()
    )
}

/// User prompt for one chunk of page content
pub fn build_prompt(url: &str, chunk: &str, index: usize, total: usize) -> String {
    format!(
        "<url>{}</url>\n<part>{} of {}</part>\n<content>\n{}\n</content>",
        url,
        index + 1,
        total,
        chunk
    )
}

/// One chunk's answer after parsing
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkAnswer {
    /// Nothing, or an empty JSON array
    Empty,
    /// Items of a JSON answer
    Json(Vec<Value>),
    /// An answer that is not JSON
    Text(String),
}

/// Parse a model response into a chunk answer
///
/// Looks inside `<blocks>` tags when present and strips markdown code fences.
pub fn parse_answer(response: &str) -> ChunkAnswer {
    let body = strip_code_fence(extract_blocks(response));
    if body.is_empty() {
        return ChunkAnswer::Empty;
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) if items.is_empty() => ChunkAnswer::Empty,
        Ok(Value::Array(items)) => ChunkAnswer::Json(items),
        Ok(Value::Null) => ChunkAnswer::Empty,
        Ok(value) => ChunkAnswer::Json(vec![value]),
        Err(_) => ChunkAnswer::Text(body.to_string()),
    }
}

fn extract_blocks(response: &str) -> &str {
    let Some(open) = response.find("<blocks>") else {
        return response.trim();
    };
    let rest = &response[open + "<blocks>".len()..];
    match rest.find("</blocks>") {
        Some(close) => rest[..close].trim(),
        None => rest.trim(),
    }
}

fn strip_code_fence(body: &str) -> &str {
    let Some(rest) = body.strip_prefix("```") else {
        return body;
    };
    // drop the info string, e.g. "json"
    let rest = rest.split_once('\n').map_or("", |(_, tail)| tail);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Merge chunk answers in chunk order
///
/// All-JSON answers merge into one JSON array. If any chunk answered in plain
/// text, every non-empty answer is joined as text instead. Returns `None` when
/// no chunk produced anything.
pub fn merge_answers(answers: Vec<ChunkAnswer>) -> Option<String> {
    let answers: Vec<ChunkAnswer> = answers
        .into_iter()
        .filter(|answer| *answer != ChunkAnswer::Empty)
        .collect();

    if answers.is_empty() {
        return None;
    }

    if answers.iter().all(|a| matches!(a, ChunkAnswer::Json(_))) {
        let merged: Vec<Value> = answers
            .into_iter()
            .flat_map(|answer| match answer {
                ChunkAnswer::Json(items) => items,
                _ => Vec::new(),
            })
            .collect();
        return Some(Value::Array(merged).to_string());
    }

    let texts: Vec<String> = answers
        .into_iter()
        .map(|answer| match answer {
            ChunkAnswer::Json(items) => Value::Array(items).to_string(),
            ChunkAnswer::Text(text) => text,
            ChunkAnswer::Empty => String::new(),
        })
        .collect();
    Some(texts.join("\n\n"))
}
