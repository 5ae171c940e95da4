use code_count_core::{Family, LineKind, classify};
use proptest::prelude::*;

fn code_families() -> impl Strategy<Value = Family> {
    prop_oneof![Just(Family::Python), Just(Family::CLike), Just(Family::Lua)]
}

proptest! {
    #[test]
    fn test_complete_runs_account_for_every_line(
        family in code_families(),
        content in "[a-z0-9 \t\n#/*(){}\\[\\]'\"=,.-]{0,300}"
    ) {
        let result = classify(&content, &family.rule_table());
        prop_assert!(result.accounted <= result.lines);
        if result.is_complete() {
            prop_assert_eq!(result.counts.classified(), result.lines);
            prop_assert_eq!(result.counts.total, result.lines);
        }
    }

    #[test]
    fn test_classification_terminates_on_arbitrary_text(
        family in code_families(),
        content in "\\PC{0,200}"
    ) {
        let result = classify(&content, &family.rule_table());
        if let Some(remainder) = &result.remainder {
            prop_assert!(remainder.offset < content.len() + 1);
            prop_assert!(remainder.line >= 1);
        }
    }

    #[test]
    fn test_padding_is_idempotent(
        family in code_families(),
        content in "[a-z (){}'#/\n;-]{0,200}"
    ) {
        prop_assume!(!content.ends_with('\n'));
        let table = family.rule_table();
        let bare = classify(&content, &table);
        let padded = classify(&format!("{content}\n"), &table);
        prop_assert_eq!(bare, padded);
    }

    #[test]
    fn test_text_family_counts_physical_lines(content in "[a-z #\n]{0,200}") {
        let result = classify(&content, &Family::Text.rule_table());
        let newlines = content.matches('\n').count();
        let expected = if content.ends_with('\n') { newlines } else { newlines + 1 };
        prop_assert!(result.is_complete());
        prop_assert_eq!(result.counts.total, expected);
        prop_assert_eq!(result.counts.get(LineKind::Code), 0);
    }

    #[test]
    fn test_docstring_inside_call_is_code(
        indent in "[ ]{0,8}",
        body in "[a-z \n]{0,40}"
    ) {
        let text = format!("call(\n{indent}'''{body}'''\n)\n");
        let result = classify(&text, &Family::Python.rule_table());
        prop_assert_eq!(result.counts.comment, 0);
        prop_assert_eq!(result.counts.blank, 0);
        prop_assert_eq!(result.counts.code, result.lines);
    }

    #[test]
    fn test_trailing_comment_fuses_into_code_line(
        code in "[a-z][a-z =;0-9]{0,20}",
        note in "[a-z ]{0,20}"
    ) {
        let result = classify(&format!("{code} // {note}\n"), &Family::CLike.rule_table());
        prop_assert_eq!(result.counts.code, 1);
        prop_assert_eq!(result.counts.comment, 0);
        prop_assert_eq!(result.counts.total, 1);
    }

    #[test]
    fn test_blank_line_inside_block_comment(
        head in "[a-z ]{0,10}",
        gap in "[ \t]{0,4}",
        tail in "[a-z ]{0,10}"
    ) {
        let text = format!("/*{head}\n{gap}\n{tail}*/\n");
        let result = classify(&text, &Family::CLike.rule_table());
        prop_assert_eq!(result.counts.comment, 2);
        prop_assert_eq!(result.counts.blank, 1);
        prop_assert_eq!(result.counts.total, 3);
    }
}
