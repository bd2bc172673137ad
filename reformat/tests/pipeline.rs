use pretty_assertions::assert_eq;

use reformat::check::check;
use reformat::{Config, enhance, format};
use specdoc::Heading;

fn enhanced(source: &str) -> String {
    enhance(source, &Config::default())
        .expect("enhance failed")
        .text
}

fn formatted(source: &str) -> String {
    format(source, &Config::default()).text
}

/// Fenced blocks of a document, fence lines excluded.
fn code_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    for line in text.lines() {
        if line.trim().starts_with("```") {
            match current.take() {
                Some(block) => blocks.push(block),
                None => current = Some(Vec::new()),
            }
        } else if let Some(block) = current.as_mut() {
            block.push(line);
        }
    }
    blocks
}

const FORMATTED_SPEC: &str = "\
# Care Platform Spec

Core domain modules.

## 1. Overview

This module uses prisma for storage.
- users
- orders
Details follow.

### 1.1 Schema

```
model User {
  id String @id
}
```

## 2. API

```
GET /api/users
```

See /app/api/users/route.ts for the handler.
";

#[test]
fn enhance_full_document() {
    assert_eq!(
        enhanced(FORMATTED_SPEC),
        "\
# Care Platform Spec


# Table of Contents

- [1. Overview](#1-overview)
  - [1.1 Schema](#11-schema)
- [2. API](#2-api)


Core domain modules.

---

## 1. Overview

This module uses **Prisma** for storage.

- users
- orders

Details follow.

### 1.1 Schema

```prisma
model User {
  id String @id
}
```

---

## 2. API

```http
GET /api/users
```

See `/app/api/users/route.ts` for the handler.
"
    );
}

#[test]
fn enhance_reports_headings_and_changed_passes() {
    let rewrite = enhance(FORMATTED_SPEC, &Config::default()).expect("enhance failed");
    assert_eq!(
        rewrite.headings,
        vec![
            Heading::new(1, "Care Platform Spec"),
            Heading::new(2, "1. Overview"),
            Heading::new(3, "1.1 Schema"),
            Heading::new(2, "2. API"),
        ]
    );
    assert_eq!(
        rewrite.changed_by,
        vec!["toc", "code-tags", "dividers", "emphasis", "lists", "whitespace"]
    );
}

#[test]
fn already_correct_input_only_gains_toc_and_dividers() {
    let source = "\
# Service Spec
Short summary line.

## 1. Setup

Install the tools:

- node
- pnpm

```bash
pnpm install
# comment inside code
- not a list
```

## 2. Usage

Run it.
";
    let output = enhanced(source);
    assert_eq!(
        output,
        "\
# Service Spec

Short summary line.

# Table of Contents

- [1. Setup](#1-setup)
- [2. Usage](#2-usage)


---

## 1. Setup

Install the tools:

- node
- pnpm

```bash
pnpm install
# comment inside code
- not a list
```

---

## 2. Usage

Run it.
"
    );
    assert_eq!(code_blocks(&output), code_blocks(source));
}

#[test]
fn headings_inside_code_stay_out_of_the_toc() {
    let source = "# Doc\n\n## Real\n\n```\n## Fake\n```\n";
    let output = enhanced(source);
    assert!(output.contains("- [Real](#real)"));
    assert!(!output.contains("[Fake]"));
}

#[test]
fn enhance_with_custom_config() {
    let config = Config {
        keywords: vec!["Rust".to_string()],
        toc_title: "Contents".to_string(),
        ..Config::default()
    };
    let rewrite = enhance("# Doc\n\n## Why rust\n", &config).expect("enhance failed");
    assert!(rewrite.text.contains("# Contents\n"));
    assert!(rewrite.text.contains("## Why **Rust**"));
}

const RAW_SPEC: &str = "\
#Care Platform Spec
Core domain modules.
1. Overview
This module stores users.
- users
- orders



Details follow.
```
# not a heading
1. not a heading either?
```
Trailing text.


";

#[test]
fn format_full_document() {
    assert_eq!(
        formatted(RAW_SPEC),
        "\
# Care Platform Spec

Core domain modules.

## 1. Overview

This module stores users.

- users
- orders

Details follow.

```
# not a heading
## 1. not a heading either?
```

Trailing text.
"
    );
}

#[test]
fn format_is_stable_on_its_own_output() {
    let once = formatted(RAW_SPEC);
    assert_eq!(formatted(&once), once);
}

#[test]
fn format_keeps_hangul_intact() {
    assert_eq!(
        formatted("# 명세서\n1. 개요\n본문입니다."),
        "# 명세서\n\n## 1. 개요\n\n본문입니다.\n"
    );
}

#[test]
fn check_passes_on_formatted_document() {
    let source = formatted(RAW_SPEC);
    let rewrite = format(&source, &Config::default());
    assert!(check(&source, &rewrite, 0).is_empty());
}

#[test]
fn check_points_at_first_changed_line() {
    let source = "# Title\ntext\n";
    let rewrite = format(source, &Config::default());
    let notices = check(source, &rewrite, 7);
    assert_eq!(notices.len(), 1);
    let notice = &notices[0];
    assert!(notice.is_error());
    assert_eq!(notice.file_id, 7);
    assert_eq!(&source[notice.span.clone()], "text");
    assert!(notice.notes.iter().any(|n| n.contains("changed by: layout")));
}

#[test]
fn check_warns_about_unterminated_fence() {
    let source = "# Title\n\n```\nnever closed\n";
    let rewrite = format(source, &Config::default());
    let notices = check(source, &rewrite, 0);
    let warning = notices
        .iter()
        .find(|n| !n.is_error())
        .expect("expected a warning");
    assert_eq!(warning.message, "unterminated code fence");
    assert_eq!(&source[warning.span.clone()], "```");
}
