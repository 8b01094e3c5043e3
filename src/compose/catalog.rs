//! Built-in tool catalog
//!
//! Security groups are returned in their output order. Technology rules are
//! evaluated in declaration order.

use super::detectors;
use super::groups::{Category, SecurityLevel, ToolGroup};

const PRE_COMMIT_HOOKS: &str = "https://github.com/pre-commit/pre-commit-hooks";
const PRE_COMMIT_HOOKS_REV: &str = "v4.5.0";

/// Technology rule: when any of `any_of` is detected, its groups apply
#[derive(Debug, Clone)]
pub struct TechnologyRule {
    pub name: &'static str,
    pub any_of: &'static [&'static str],
    pub groups: Vec<ToolGroup>,
}

impl TechnologyRule {
    fn new(name: &'static str, any_of: &'static [&'static str], groups: Vec<ToolGroup>) -> Self {
        Self {
            name,
            any_of,
            groups: groups
                .into_iter()
                .map(|g| g.category(Category::Technology))
                .collect(),
        }
    }
}

/// Complete set of groups and rules a composer draws from
#[derive(Debug, Clone)]
pub struct Catalog {
    pub base: Vec<ToolGroup>,
    pub enhanced: Vec<ToolGroup>,
    pub maximum: Vec<ToolGroup>,
    pub technology: Vec<TechnologyRule>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            base: base_groups(),
            enhanced: enhanced_groups(),
            maximum: maximum_groups(),
            technology: technology_rules(),
        }
    }
}

/// Secret scanning that every configuration carries
pub fn base_groups() -> Vec<ToolGroup> {
    vec![
        ToolGroup::plugin(
            "gitleaks",
            "Detect hardcoded secrets",
            "https://github.com/gitleaks/gitleaks",
            "v8.18.2",
        ),
        ToolGroup::command(
            "trufflehog",
            "Scan for verified secrets",
            "trufflehog git file://. --since-commit HEAD --only-verified --fail --no-update",
            "system",
        ),
    ]
    .into_iter()
    .map(|g| g.category(Category::Base).level(SecurityLevel::Basic))
    .collect()
}

/// File hygiene, secret baseline and dependency audit (level 2+)
pub fn enhanced_groups() -> Vec<ToolGroup> {
    let hygiene = |id: &str, name: &str| ToolGroup::plugin(id, name, PRE_COMMIT_HOOKS, PRE_COMMIT_HOOKS_REV);

    vec![
        hygiene("check-added-large-files", "Check for added large files")
            .args(&["--maxkb=1000"])
            .package("pre-commit-hooks", "4.5.0"),
        hygiene("check-merge-conflict", "Check for merge conflict markers"),
        hygiene("check-yaml", "Check YAML syntax").args(&["--allow-multiple-documents"]),
        hygiene("check-json", "Check JSON syntax"),
        hygiene("end-of-file-fixer", "Fix end of files"),
        hygiene("trailing-whitespace", "Trim trailing whitespace"),
        hygiene("detect-private-key", "Detect private keys"),
        ToolGroup::plugin(
            "detect-secrets",
            "Detect secrets against baseline",
            "https://github.com/Yelp/detect-secrets",
            "v1.4.0",
        )
        .args(&["--baseline", ".secrets.baseline"])
        .exclude(r"(package-lock\.json|yarn\.lock|pnpm-lock\.yaml|poetry\.lock)$")
        .package("detect-secrets", "1.4.0"),
        ToolGroup::plugin(
            "python-safety-dependencies-check",
            "Scan dependencies for known vulnerabilities",
            "https://github.com/Lucas-C/pre-commit-hooks-safety",
            "v1.3.3",
        )
        .files(r"requirements.*\.txt$")
        .package("safety", "2.3.5"),
    ]
    .into_iter()
    .map(|g| g.category(Category::Enhanced).level(SecurityLevel::Enhanced))
    .collect()
}

/// Native heuristic detectors (level 3)
pub fn maximum_groups() -> Vec<ToolGroup> {
    vec![
        ToolGroup::detector(
            "enterprise-secret-patterns",
            "Enterprise secret pattern scan",
            detectors::ENTERPRISE_SECRETS,
        ),
        ToolGroup::detector(
            "debug-statements",
            "Debug statement scan",
            detectors::DEBUG_STATEMENTS,
        ),
        ToolGroup::detector("ai-content-check", "AI content heuristic scan", detectors::AI_CONTENT),
        ToolGroup::detector(
            "encoded-content-check",
            "Encoded content heuristic scan",
            detectors::ENCODED_CONTENT,
        ),
        ToolGroup::detector("key-file-check", "Certificate and key file scan", detectors::KEY_FILES),
        ToolGroup::detector(
            "suspicious-execution-check",
            "Suspicious execution pattern scan",
            detectors::SUSPICIOUS_EXECUTION,
        ),
    ]
    .into_iter()
    .map(|g| g.category(Category::Maximum).level(SecurityLevel::Maximum))
    .collect()
}

/// Technology-specific rules in evaluation order
pub fn technology_rules() -> Vec<TechnologyRule> {
    use SecurityLevel::{Enhanced, Maximum};

    vec![
        TechnologyRule::new(
            "javascript",
            &["nodejs", "javascript", "typescript", "react", "vue", "angular", "svelte"],
            vec![
                ToolGroup::plugin("eslint", "ESLint", "https://github.com/pre-commit/mirrors-eslint", "v8.56.0")
                    .files(r"\.(js|jsx|ts|tsx)$")
                    .args(&["--max-warnings=0"]),
                ToolGroup::plugin(
                    "prettier",
                    "Prettier",
                    "https://github.com/pre-commit/mirrors-prettier",
                    "v3.1.0",
                )
                .files(r"\.(js|jsx|ts|tsx|json|css|scss|md)$")
                .level(Enhanced),
            ],
        ),
        TechnologyRule::new(
            "python",
            &["python", "django", "flask", "fastapi"],
            vec![
                ToolGroup::plugin("bandit", "Bandit security linter", "https://github.com/PyCQA/bandit", "1.7.6")
                    .args(&["-ll", "--skip", "B101"])
                    .exclude(r"^tests?/")
                    .package("bandit", "1.7.6"),
                ToolGroup::plugin("flake8", "Flake8", "https://github.com/PyCQA/flake8", "7.0.0")
                    .args(&["--max-line-length=100"])
                    .package("flake8", "7.0.0"),
                ToolGroup::plugin("black", "Black formatter", "https://github.com/psf/black", "23.12.1")
                    .level(Enhanced)
                    .package("black", "23.12.1"),
                ToolGroup::plugin("isort", "isort", "https://github.com/PyCQA/isort", "5.13.2")
                    .args(&["--profile", "black"])
                    .level(Enhanced)
                    .package("isort", "5.13.2"),
                ToolGroup::plugin("mypy", "mypy", "https://github.com/pre-commit/mirrors-mypy", "v1.8.0")
                    .args(&["--ignore-missing-imports"])
                    .level(Maximum)
                    .package("mypy", "1.8.0"),
            ],
        ),
        TechnologyRule::new(
            "sql",
            &["sql"],
            vec![
                ToolGroup::plugin("sqlfluff-lint", "SQLFluff lint", "https://github.com/sqlfluff/sqlfluff", "3.0.0")
                    .args(&["--dialect", "ansi"])
                    .package("sqlfluff", "3.0.0"),
            ],
        ),
        TechnologyRule::new(
            "rust",
            &["rust"],
            vec![
                ToolGroup::command("cargo-clippy", "Clippy", "cargo clippy --all-targets -- -D warnings", "system")
                    .files(r"\.rs$"),
                ToolGroup::command("cargo-fmt", "rustfmt", "cargo fmt -- --check", "system")
                    .files(r"\.rs$")
                    .level(Enhanced),
            ],
        ),
        TechnologyRule::new(
            "go",
            &["go"],
            vec![
                ToolGroup::plugin("go-vet", "go vet", "https://github.com/dnephin/pre-commit-golang", "v0.5.1"),
                ToolGroup::plugin("go-fmt", "gofmt", "https://github.com/dnephin/pre-commit-golang", "v0.5.1")
                    .level(Enhanced),
            ],
        ),
        TechnologyRule::new(
            "shell",
            &["shell"],
            vec![
                ToolGroup::plugin("shellcheck", "ShellCheck", "https://github.com/shellcheck-py/shellcheck-py", "v0.9.0.6")
                    .package("shellcheck-py", "0.9.0.6"),
            ],
        ),
        TechnologyRule::new(
            "docker",
            &["docker", "docker-compose"],
            vec![
                ToolGroup::plugin("hadolint-docker", "Hadolint", "https://github.com/hadolint/hadolint", "v2.12.0"),
            ],
        ),
        TechnologyRule::new(
            "terraform",
            &["terraform"],
            vec![
                ToolGroup::plugin(
                    "terraform_validate",
                    "Terraform validate",
                    "https://github.com/antonbabenko/pre-commit-terraform",
                    "v1.86.0",
                ),
                ToolGroup::plugin(
                    "terraform_fmt",
                    "Terraform fmt",
                    "https://github.com/antonbabenko/pre-commit-terraform",
                    "v1.86.0",
                )
                .level(Enhanced),
                ToolGroup::plugin("checkov", "Checkov IaC scan", "https://github.com/bridgecrewio/checkov", "3.1.38")
                    .level(Maximum)
                    .package("checkov", "3.1.38"),
            ],
        ),
        TechnologyRule::new(
            "github-actions",
            &["github-actions"],
            vec![ToolGroup::plugin("actionlint", "actionlint", "https://github.com/rhysd/actionlint", "v1.6.26")],
        ),
        TechnologyRule::new(
            "ruby",
            &["ruby"],
            vec![ToolGroup::plugin("rubocop", "RuboCop", "https://github.com/rubocop/rubocop", "v1.59.0")],
        ),
        TechnologyRule::new(
            "yaml",
            &["yaml"],
            vec![
                ToolGroup::plugin("yamllint", "yamllint", "https://github.com/adrienverge/yamllint", "v1.33.0")
                    .args(&["-d", "relaxed"])
                    .level(Enhanced)
                    .package("yamllint", "1.33.0"),
            ],
        ),
        TechnologyRule::new(
            "markdown",
            &["markdown"],
            vec![
                ToolGroup::plugin(
                    "markdownlint",
                    "markdownlint",
                    "https://github.com/igorshubovych/markdownlint-cli",
                    "v0.38.0",
                )
                .level(Enhanced),
            ],
        ),
    ]
}
