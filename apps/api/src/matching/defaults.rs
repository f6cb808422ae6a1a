//! Built-in vocabulary data. Declaration order here is the order reasons are reported in.

use crate::matching::vocabulary::SkillCategory::{self, *};

pub const VERSION: &str = "2024.1";

pub const SKILLS: &[(&str, SkillCategory)] = &[
    // Programming languages
    ("python", Programming),
    ("java", Programming),
    ("javascript", Programming),
    ("typescript", Programming),
    ("go", Programming),
    ("rust", Programming),
    ("c++", Programming),
    ("c#", Programming),
    ("php", Programming),
    ("ruby", Programming),
    ("kotlin", Programming),
    ("swift", Programming),
    ("scala", Programming),
    ("matlab", Programming),
    ("perl", Programming),
    ("lua", Programming),
    ("dart", Programming),
    ("objective-c", Programming),
    ("cobol", Programming),
    ("fortran", Programming),
    ("haskell", Programming),
    ("clojure", Programming),
    ("erlang", Programming),
    ("elixir", Programming),
    ("sql", Programming),
    // Frontend
    ("react", Frontend),
    ("vue", Frontend),
    ("angular", Frontend),
    ("svelte", Frontend),
    ("html", Frontend),
    ("css", Frontend),
    ("sass", Frontend),
    ("jquery", Frontend),
    ("bootstrap", Frontend),
    ("tailwind", Frontend),
    ("material-ui", Frontend),
    ("webpack", Frontend),
    ("vite", Frontend),
    ("babel", Frontend),
    ("npm", Frontend),
    ("yarn", Frontend),
    ("pnpm", Frontend),
    // Backend
    ("node.js", Backend),
    ("express.js", Backend),
    ("django", Backend),
    ("flask", Backend),
    ("fastapi", Backend),
    ("spring", Backend),
    ("spring boot", Backend),
    ("laravel", Backend),
    ("symfony", Backend),
    ("rails", Backend),
    ("asp.net", Backend),
    (".net core", Backend),
    ("nestjs", Backend),
    ("next.js", Backend),
    ("nuxt.js", Backend),
    // Databases
    ("postgresql", Database),
    ("mysql", Database),
    ("mongodb", Database),
    ("redis", Database),
    ("elasticsearch", Database),
    ("cassandra", Database),
    ("dynamodb", Database),
    ("sqlite", Database),
    ("oracle", Database),
    ("sql server", Database),
    ("mariadb", Database),
    ("couchdb", Database),
    ("neo4j", Database),
    ("influxdb", Database),
    ("clickhouse", Database),
    ("snowflake", Database),
    ("bigquery", Database),
    // Cloud & infrastructure
    ("aws", Cloud),
    ("azure", Cloud),
    ("gcp", Cloud),
    ("docker", Cloud),
    ("kubernetes", Cloud),
    ("terraform", Cloud),
    ("ansible", Cloud),
    ("jenkins", Cloud),
    ("gitlab ci", Cloud),
    ("github actions", Cloud),
    ("circleci", Cloud),
    ("helm", Cloud),
    ("istio", Cloud),
    ("prometheus", Cloud),
    ("grafana", Cloud),
    ("datadog", Cloud),
    // Tools
    ("git", Tools),
    ("github", Tools),
    ("gitlab", Tools),
    ("bitbucket", Tools),
    ("jira", Tools),
    ("confluence", Tools),
    ("linux", Tools),
    ("bash", Tools),
    ("powershell", Tools),
    ("vim", Tools),
    ("postman", Tools),
    // Data & AI
    ("machine learning", DataAi),
    ("deep learning", DataAi),
    ("tensorflow", DataAi),
    ("pytorch", DataAi),
    ("scikit-learn", DataAi),
    ("pandas", DataAi),
    ("numpy", DataAi),
    ("matplotlib", DataAi),
    ("jupyter", DataAi),
    ("apache spark", DataAi),
    ("hadoop", DataAi),
    ("kafka", DataAi),
    ("airflow", DataAi),
    ("dbt", DataAi),
    ("tableau", DataAi),
    ("power bi", DataAi),
    // Architecture & protocols
    ("rest", Architecture),
    ("graphql", Architecture),
    ("grpc", Architecture),
    ("soap", Architecture),
    ("microservices", Architecture),
    ("serverless", Architecture),
    ("event-driven", Architecture),
    ("cqrs", Architecture),
    ("oauth", Architecture),
    ("jwt", Architecture),
    ("websockets", Architecture),
    // Methodologies
    ("agile", Methodology),
    ("scrum", Methodology),
    ("kanban", Methodology),
    ("devops", Methodology),
    ("ci/cd", Methodology),
    ("tdd", Methodology),
    ("bdd", Methodology),
    ("code review", Methodology),
    ("unit testing", Methodology),
    ("integration testing", Methodology),
    // Soft skills
    ("team leadership", SoftSkill),
    ("mentoring", SoftSkill),
    ("communication", SoftSkill),
    ("stakeholder management", SoftSkill),
];

/// (alias, canonical)
pub const SYNONYMS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ecmascript", "javascript"),
    ("ts", "typescript"),
    ("golang", "go"),
    ("cpp", "c++"),
    ("csharp", "c#"),
    ("objc", "objective-c"),
    ("reactjs", "react"),
    ("react.js", "react"),
    ("vuejs", "vue"),
    ("vue.js", "vue"),
    ("angularjs", "angular"),
    ("html5", "html"),
    ("css3", "css"),
    ("scss", "sass"),
    ("tailwindcss", "tailwind"),
    ("nodejs", "node.js"),
    ("node", "node.js"),
    ("expressjs", "express.js"),
    ("springboot", "spring boot"),
    ("ruby on rails", "rails"),
    ("nextjs", "next.js"),
    ("postgres", "postgresql"),
    ("mongo", "mongodb"),
    ("elastic search", "elasticsearch"),
    ("mssql", "sql server"),
    ("amazon web services", "aws"),
    ("google cloud", "gcp"),
    ("google cloud platform", "gcp"),
    ("k8s", "kubernetes"),
    ("github-actions", "github actions"),
    ("ml", "machine learning"),
    ("sklearn", "scikit-learn"),
    ("spark", "apache spark"),
    ("powerbi", "power bi"),
    ("restful", "rest"),
    ("rest api", "rest"),
    ("rest apis", "rest"),
    ("micro-services", "microservices"),
    ("cicd", "ci/cd"),
    ("continuous integration", "ci/cd"),
    ("test-driven development", "tdd"),
    ("leadership", "team leadership"),
    ("team lead", "team leadership"),
    ("mentorship", "mentoring"),
];

pub const MUST_HAVE_CUES: &[&str] = &[
    "must have",
    "must-have",
    "required",
    "requirements",
    "essential",
    "mandatory",
    "you must",
    "minimum",
];

pub const NICE_TO_HAVE_CUES: &[&str] = &[
    "nice to have",
    "nice-to-have",
    "preferred",
    "bonus",
    "a plus",
    "desirable",
    "beneficial",
    "advantage",
    "good to have",
    "familiarity with",
    "exposure to",
    "optional",
];

/// Skill-specific practice paths used in CV improvement suggestions.
pub const LEARNING_PATHS: &[(&str, &str)] = &[
    ("python", "complete a Python certification course and build REST API projects"),
    ("react", "build two or three React applications with modern hooks and state management"),
    ("aws", "pursue the AWS Cloud Practitioner certification and practice on free tier services"),
    ("kubernetes", "set up a local k8s cluster and deploy containerized applications"),
    ("postgresql", "practice database design and query optimization with real datasets"),
    ("docker", "containerize existing projects and use Docker Compose for multi-service apps"),
    ("tensorflow", "complete machine learning courses and implement neural network projects"),
    ("django", "build a full-stack web application with authentication and database integration"),
];

/// Fallback practice path for a skill's category. `{skill}` is substituted.
pub fn category_learning_path(category: SkillCategory) -> &'static str {
    match category {
        Programming => "take online courses and build projects demonstrating {skill} proficiency",
        Frontend => "create modern web applications showcasing {skill} best practices",
        Backend => "develop API services and server-side applications using {skill}",
        Database => "practice data modeling and query optimization with {skill}",
        Cloud => "gain hands-on experience with {skill} through tutorials and free tier usage",
        DataAi => "complete data science projects and courses focused on {skill}",
        Tools => "integrate {skill} into your development workflow and document the process",
        Architecture => "design and ship a small service that applies {skill} end to end",
        Methodology => "describe a project where your team practiced {skill} and what it changed",
        SoftSkill => "add concrete examples where you demonstrated {skill}, with team size and outcome",
    }
}
