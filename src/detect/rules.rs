//! Detection rule tables
//!
//! Each record maps one kind of signal to the tags it implies. The tables are
//! evaluated in declaration order; order only affects which signal is
//! reported as evidence for a tag, never the resulting tag set.

use crate::scanner::SignalKind;

/// A declarative signal-to-tags record
#[derive(Debug, Clone, Copy)]
pub struct DetectionRule {
    pub kind: SignalKind,
    /// Glob on the file name (`File`), path suffix (`Directory`), exact
    /// extension (`Extension`) or glob on `ecosystem:name` (`Dependency`)
    pub pattern: &'static str,
    pub tags: &'static [&'static str],
}

const fn rule(kind: SignalKind, pattern: &'static str, tags: &'static [&'static str]) -> DetectionRule {
    DetectionRule { kind, pattern, tags }
}

use SignalKind::{Dependency, Directory, Extension, File};

/// Marker files and manifests: ecosystem and build-system presence
pub const MARKER_RULES: &[DetectionRule] = &[
    rule(File, "package.json", &["nodejs"]),
    rule(File, "package-lock.json", &["nodejs", "npm"]),
    rule(File, "yarn.lock", &["nodejs", "yarn"]),
    rule(File, "pnpm-lock.yaml", &["nodejs", "pnpm"]),
    rule(File, "tsconfig.json", &["typescript"]),
    rule(File, "deno.json", &["deno", "typescript"]),
    rule(File, "angular.json", &["angular"]),
    rule(File, "next.config.{js,mjs,ts}", &["nextjs", "react"]),
    rule(File, "vite.config.{js,ts}", &["vite"]),
    rule(File, "requirements*.txt", &["python"]),
    rule(File, "pyproject.toml", &["python"]),
    rule(File, "setup.py", &["python"]),
    rule(File, "setup.cfg", &["python"]),
    rule(File, "Pipfile", &["python", "pipenv"]),
    rule(File, "poetry.lock", &["python", "poetry"]),
    rule(File, "manage.py", &["python", "django"]),
    rule(File, "Cargo.toml", &["rust"]),
    rule(File, "go.mod", &["go"]),
    rule(File, "pom.xml", &["java", "maven"]),
    rule(File, "build.gradle", &["java", "gradle"]),
    rule(File, "build.gradle.kts", &["kotlin", "gradle"]),
    rule(File, "Gemfile", &["ruby"]),
    rule(File, "composer.json", &["php"]),
    rule(File, "Package.swift", &["swift"]),
    rule(File, "pubspec.yaml", &["dart"]),
    rule(File, "*.csproj", &["csharp", "dotnet"]),
    rule(File, "*.sln", &["dotnet"]),
    rule(File, "CMakeLists.txt", &["cpp", "cmake"]),
    rule(File, "Makefile", &["make"]),
    rule(File, "Dockerfile*", &["docker"]),
    rule(File, "docker-compose*.{yml,yaml}", &["docker", "docker-compose"]),
    rule(File, "compose.{yml,yaml}", &["docker", "docker-compose"]),
    rule(File, "Chart.yaml", &["helm", "kubernetes"]),
    rule(File, ".terraform.lock.hcl", &["terraform"]),
    rule(File, "serverless.{yml,yaml}", &["serverless"]),
    rule(File, ".gitlab-ci.yml", &["gitlab-ci"]),
];

/// Directory names and paths
pub const DIRECTORY_RULES: &[DetectionRule] = &[
    rule(Directory, ".github/workflows", &["github-actions"]),
    rule(Directory, "terraform", &["terraform"]),
    rule(Directory, "k8s", &["kubernetes"]),
    rule(Directory, "kubernetes", &["kubernetes"]),
    rule(Directory, "helm", &["helm", "kubernetes"]),
    rule(Directory, "migrations", &["sql"]),
    rule(Directory, "ansible", &["ansible"]),
    rule(Directory, "playbooks", &["ansible"]),
];

/// File extensions
pub const EXTENSION_RULES: &[DetectionRule] = &[
    rule(Extension, "py", &["python"]),
    rule(Extension, "ipynb", &["python", "jupyter"]),
    rule(Extension, "js", &["javascript"]),
    rule(Extension, "mjs", &["javascript"]),
    rule(Extension, "cjs", &["javascript"]),
    rule(Extension, "jsx", &["javascript", "react"]),
    rule(Extension, "ts", &["typescript"]),
    rule(Extension, "tsx", &["typescript", "react"]),
    rule(Extension, "vue", &["vue"]),
    rule(Extension, "svelte", &["svelte"]),
    rule(Extension, "rs", &["rust"]),
    rule(Extension, "go", &["go"]),
    rule(Extension, "java", &["java"]),
    rule(Extension, "kt", &["kotlin"]),
    rule(Extension, "rb", &["ruby"]),
    rule(Extension, "php", &["php"]),
    rule(Extension, "cs", &["csharp"]),
    rule(Extension, "swift", &["swift"]),
    rule(Extension, "c", &["c"]),
    rule(Extension, "cpp", &["cpp"]),
    rule(Extension, "cc", &["cpp"]),
    rule(Extension, "hpp", &["cpp"]),
    rule(Extension, "sql", &["sql"]),
    rule(Extension, "sh", &["shell"]),
    rule(Extension, "bash", &["shell"]),
    rule(Extension, "zsh", &["shell"]),
    rule(Extension, "ps1", &["powershell"]),
    rule(Extension, "tf", &["terraform"]),
    rule(Extension, "hcl", &["terraform"]),
    rule(Extension, "yml", &["yaml"]),
    rule(Extension, "yaml", &["yaml"]),
    rule(Extension, "md", &["markdown"]),
    rule(Extension, "css", &["css"]),
    rule(Extension, "scss", &["css"]),
    rule(Extension, "html", &["html"]),
];

/// Declared dependencies: framework and library tags
pub const DEPENDENCY_RULES: &[DetectionRule] = &[
    rule(Dependency, "npm:react", &["react"]),
    rule(Dependency, "npm:react-dom", &["react"]),
    rule(Dependency, "npm:next", &["nextjs", "react"]),
    rule(Dependency, "npm:vue", &["vue"]),
    rule(Dependency, "npm:nuxt", &["nuxt", "vue"]),
    rule(Dependency, "npm:@angular/core", &["angular", "typescript"]),
    rule(Dependency, "npm:svelte", &["svelte"]),
    rule(Dependency, "npm:express", &["express"]),
    rule(Dependency, "npm:@nestjs/*", &["nestjs", "typescript"]),
    rule(Dependency, "npm:typescript", &["typescript"]),
    rule(Dependency, "npm:electron", &["electron"]),
    rule(Dependency, "npm:tailwindcss", &["tailwind"]),
    rule(Dependency, "npm:jest", &["jest"]),
    rule(Dependency, "pypi:django", &["django"]),
    rule(Dependency, "pypi:flask", &["flask"]),
    rule(Dependency, "pypi:fastapi", &["fastapi"]),
    rule(Dependency, "pypi:sqlalchemy", &["sqlalchemy"]),
    rule(Dependency, "pypi:pandas", &["data-science"]),
    rule(Dependency, "pypi:numpy", &["data-science"]),
];

/// Every rule, in evaluation order
pub fn all_rules() -> impl Iterator<Item = &'static DetectionRule> {
    MARKER_RULES
        .iter()
        .chain(DIRECTORY_RULES)
        .chain(EXTENSION_RULES)
        .chain(DEPENDENCY_RULES)
}
