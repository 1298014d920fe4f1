//! Fixed vocabularies for heuristic resume analysis. All terms lowercase;
//! matching is done against lowercased text.

/// Common technology and skill terms to look for.
pub const TECHNICAL_SKILLS: &[&str] = &[
    "javascript",
    "python",
    "java",
    "c++",
    "c#",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "react",
    "angular",
    "vue",
    "node",
    "express",
    "django",
    "flask",
    "spring",
    "html",
    "css",
    "sass",
    "less",
    "tailwind",
    "bootstrap",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "firebase",
    "dynamodb",
    "oracle",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "jenkins",
    "git",
    "github",
    "machine learning",
    "ai",
    "artificial intelligence",
    "data science",
    "nlp",
    "tensorflow",
    "pytorch",
    "keras",
    "scikit-learn",
    "pandas",
    "numpy",
    "mobile",
    "android",
    "ios",
    "flutter",
    "react native",
    "agile",
    "scrum",
    "kanban",
    "jira",
    "confluence",
];

/// Common job titles, most specific first — the first match wins.
pub const JOB_TITLES: &[&str] = &[
    "software engineer",
    "developer",
    "programmer",
    "web developer",
    "frontend",
    "backend",
    "full stack",
    "data scientist",
    "data analyst",
    "data engineer",
    "machine learning",
    "devops",
    "sre",
    "site reliability",
    "cloud",
    "architect",
    "lead",
    "senior",
    "junior",
    "manager",
    "director",
    "vp",
    "head",
    "chief",
    "cto",
    "cio",
    "ceo",
    "product manager",
    "project manager",
    "program manager",
    "scrum master",
    "ux",
    "ui",
    "user experience",
    "user interface",
    "designer",
    "graphic",
];

/// Degree and institution keywords for the education section scan.
pub const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "doctorate",
    "bs",
    "ms",
    "ba",
    "ma",
    "mba",
    "degree",
    "university",
    "college",
    "institute",
    "school",
    "academy",
    "computer science",
    "engineering",
    "information technology",
    "it",
    "mathematics",
    "physics",
    "business",
    "management",
    "administration",
    "finance",
    "economics",
];
