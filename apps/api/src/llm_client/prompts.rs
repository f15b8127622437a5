// Cross-cutting prompt fragments. Feature prompts live in a prompts.rs beside the
// module that sends them.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every extraction prompt.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: Copy facts from the source text only. Do NOT infer, embellish, or invent \
    names, dates, employers, or skills. If the text does not contain a value, use an empty \
    string or an empty list for that field.";
