// All LLM prompt constants for the interview module. Placeholders are
// replaced before sending; prompts demand JSON-only replies, but replies
// are still decoded through the lenient parse module.

/// Initial question batch. Replace `{resume_text}` and `{count}`.
pub const INITIAL_QUESTIONS_PROMPT: &str = r#"Resume Text:
{resume_text}

Based on the resume text, please provide {count} interview questions covering the skills and technologies listed in the resume, asking for specific examples and experiences. Additionally, include general interview questions such as salary expectations, strengths and weaknesses, career goals, and how the candidate handles challenges and teamwork.

Reply with a JSON array only. Each element must have a "question" field and an "answer" field containing a strong model answer. Do not include any text outside the JSON array. Do not use markdown code fences."#;

/// Follow-up generation from a prior answer. Replace `{prior_answer}` and `{count}`.
pub const FOLLOW_UP_PROMPT: &str = r#"A candidate gave the following answer during a mock interview:
{prior_answer}

Generate {count} follow-up question(s) that dig deeper into the candidate's response. Each follow-up should be challenging but relevant to the original topic.

Reply with a JSON array only. Each element must have a "question" field and an "answer" field containing a strong model answer. Do not include any text outside the JSON array. Do not use markdown code fences."#;

/// Answer evaluation. Replace `{question}`, `{user_answer}`,
/// `{reference_block}` and `{resume_block}` (the blocks may be empty).
pub const EVALUATION_PROMPT: &str = r#"You are an expert technical interviewer evaluating a candidate's response to an interview question.

Question: {question}
Candidate's Answer: {user_answer}
{reference_block}{resume_block}
Evaluate the answer thoroughly based on:

1. Technical Accuracy: Is the information factually correct? Are concepts, terms, and technologies used properly?

2. Completeness: Does the answer address all key aspects of the question?

3. Relevance to Experience: If a resume is provided, how well does the answer reflect the candidate's stated skills and experience?

4. Communication Quality: Is the answer structured and clear?

Return a JSON object with exactly these fields and no surrounding prose:
{
  "rating": number (0-10 score),
  "feedback": string (detailed feedback with strengths and areas for improvement)
}"#;
