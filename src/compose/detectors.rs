//! Native content detectors used at the maximum security level
//!
//! Patterns must stay inside the regex subset shared by GNU `grep -E` and
//! .NET `Select-String`: no lookarounds, no backreferences, no `\s` inside
//! bracket expressions.

use super::groups::{DetectorSpec, MatchMode};

const SOURCE_FILES: &[&str] = &[
    "*.py", "*.js", "*.jsx", "*.ts", "*.tsx", "*.rb", "*.php", "*.rs", "*.java", "*.go",
];

const SCRIPT_FILES: &[&str] = &[
    "*.py", "*.js", "*.jsx", "*.ts", "*.tsx", "*.rb", "*.php", "*.java", "*.sh", "*.ps1",
];

pub const ENTERPRISE_SECRETS: DetectorSpec = DetectorSpec {
    title: "Enterprise secret pattern",
    success: "No enterprise secret patterns found",
    mode: MatchMode::Content {
        patterns: &[
            r"AKIA[0-9A-Z]{16}",
            r"-----BEGIN (RSA |EC |DSA |OPENSSH |PGP )?PRIVATE KEY( BLOCK)?-----",
            r"xox[baprs]-[0-9A-Za-z-]{10,}",
            r"gh[pousr]_[A-Za-z0-9]{36}",
            r"sk_live_[0-9A-Za-z]{24,}",
            r"AIza[0-9A-Za-z_-]{35}",
            r"[a-z]+://[A-Za-z0-9._%-]+:[A-Za-z0-9._%-]+@[A-Za-z0-9.-]+",
        ],
        case_insensitive: false,
        include: &[],
    },
};

pub const DEBUG_STATEMENTS: DetectorSpec = DetectorSpec {
    title: "Debug statement",
    success: "No debug statements found",
    mode: MatchMode::Content {
        patterns: &[
            r"console\.(log|debug|trace)\(",
            r"debugger;",
            r"import pdb",
            r"pdb\.set_trace\(",
            r"breakpoint\(\)",
            r"binding\.pry",
            r"var_dump\(",
            r"print_r\(",
            r"dbg!\(",
            r"System\.out\.println\(",
        ],
        case_insensitive: false,
        include: SOURCE_FILES,
    },
};

pub const AI_CONTENT: DetectorSpec = DetectorSpec {
    title: "AI-generated content marker",
    success: "No AI-generated content markers found",
    mode: MatchMode::Content {
        patterns: &[
            r"as an ai language model",
            r"as a large language model",
            r"i hope this helps",
            r"certainly! here",
            r"generated by (chatgpt|gpt-4|claude|copilot)",
            "\u{1F916}",
            "\u{2728}",
            "\u{1F680}",
            "\u{1F389}",
        ],
        case_insensitive: true,
        include: &[],
    },
};

pub const ENCODED_CONTENT: DetectorSpec = DetectorSpec {
    title: "Encoded payload",
    success: "No suspicious encoded content found",
    mode: MatchMode::Content {
        patterns: &[
            r"[A-Za-z0-9+/]{120,}={0,2}",
            r"eval\(atob\(",
            r"base64 (-d|--decode)",
            r"(\\x[0-9a-fA-F]{2}){16,}",
            r"String\.fromCharCode\(([0-9]+, *){10,}",
        ],
        case_insensitive: false,
        include: &[],
    },
};

pub const KEY_FILES: DetectorSpec = DetectorSpec {
    title: "Certificate or private key file",
    success: "No certificate or key files found",
    mode: MatchMode::FileName {
        globs: &[
            "*.pem", "*.key", "*.p12", "*.pfx", "*.jks", "*.keystore", "*.ppk", "id_rsa", "id_dsa",
            "id_ecdsa", "id_ed25519",
        ],
        reason: "sensitive key material file",
    },
};

pub const SUSPICIOUS_EXECUTION: DetectorSpec = DetectorSpec {
    title: "Suspicious execution pattern",
    success: "No suspicious execution patterns found",
    mode: MatchMode::Content {
        patterns: &[
            r"eval\(",
            r"exec\(",
            r"os\.system\(",
            r"subprocess\.[a-z_]+\(.*shell=True",
            r"child_process",
            r"Runtime\.getRuntime\(\)\.exec\(",
            r"new Function\(",
            r"Invoke-Expression",
            r"curl [^|]*\| *(ba)?sh",
            r"wget [^|]*\| *(ba)?sh",
        ],
        case_insensitive: false,
        include: SCRIPT_FILES,
    },
};
