// Prompt constants and builders for the two oracle operations:
// scoring (structured JSON feedback) and rewriting (plain-text resume).

use crate::llm_client::JobContext;

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for the rewrite operation.
pub const REWRITE_SYSTEM: &str = "You are an expert ATS optimization specialist. \
    You respond with plain resume text only: no markdown code fences, \
    no commentary, no preamble. Start directly with the candidate name.";

/// Shape of the scoring response, embedded in the prompt verbatim.
const FEEDBACK_FORMAT: &str = r#"{
  "overallScore": number (max 100),
  "ATS": { "score": number, "tips": [{ "type": "good" | "improve", "tip": string }] },
  "toneAndStyle": { "score": number, "tips": [{ "type": "good" | "improve", "tip": string (short title), "explanation": string (detail) }] },
  "content": { "score": number, "tips": [same shape as toneAndStyle] },
  "structure": { "score": number, "tips": [same shape as toneAndStyle] },
  "skills": { "score": number, "tips": [same shape as toneAndStyle] }
}
Give 3-4 tips per category."#;

/// Builds the ATS scoring prompt.
pub fn scoring_prompt(resume_text: &str, job: &JobContext) -> String {
    format!(
        "You are an expert in ATS (Applicant Tracking System) and resume analysis.\n\
         Analyze and rate this resume and suggest how to improve it.\n\
         The rating can be low if the resume is bad. Be thorough and detailed;\n\
         do not hesitate to give low scores when there is a lot to improve.\n\
         Take the job details into consideration for more specific feedback.\n\
         \n\
         The job title is: {job_title}\n\
         The company is: {company_name}\n\
         The job description is: {job_description}\n\
         \n\
         Resume content:\n\
         {resume_text}\n\
         \n\
         Provide the feedback as a JSON object with exactly this shape:\n\
         {FEEDBACK_FORMAT}\n\
         \n\
         Return the analysis as a JSON object, without any other text and without backticks.",
        job_title = job.job_title,
        company_name = job.company_name,
        job_description = job.job_description,
    )
}

/// Builds the resume-rewrite prompt. `feedback` is the previous scoring
/// result, serialized, when one exists.
pub fn rewrite_prompt(resume_text: &str, job: &JobContext, feedback: Option<&str>) -> String {
    let feedback_block = feedback
        .map(|f| format!("PREVIOUS ATS ANALYSIS:\n{f}\n\n"))
        .unwrap_or_default();

    format!(
        "You are an expert ATS optimization specialist. Rewrite this resume so it \
         scores as highly as possible on ATS systems for the job below.\n\
         \n\
         JOB DETAILS:\n\
         Position: {job_title}\n\
         Company: {company_name}\n\
         Job Description: {job_description}\n\
         \n\
         {feedback_block}\
         REQUIREMENTS:\n\
         - Extract the important keywords from the job description and use them \
         naturally, with exact phrase matches where relevant.\n\
         - Use ONLY standard section headers: PROFESSIONAL SUMMARY, PROFESSIONAL \
         EXPERIENCE, EDUCATION, TECHNICAL SKILLS, PROJECTS, ACHIEVEMENTS.\n\
         - One-column layout, simple bullet points starting with the \u{2022} character.\n\
         - Candidate name in UPPERCASE on the first line, contact details on one \
         line with | separators.\n\
         - Preserve ALL URLs exactly as they appear in the original resume.\n\
         - Experience in reverse chronological order; every bullet follows \
         action verb + task + quantified result.\n\
         - Remove or minimize irrelevant experience.\n\
         \n\
         Original resume:\n\
         {resume_text}\n\
         \n\
         Provide ONLY the optimized resume content in plain text. \
         No explanations, no commentary. Start directly with the candidate name.",
        job_title = job.job_title,
        company_name = job.company_name,
        job_description = job.job_description,
    )
}
