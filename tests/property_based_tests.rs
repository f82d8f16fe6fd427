// Property-based tests using proptest
// Random generation finds the line-shape edge cases unit tests miss

use proptest::prelude::*;
use vimshim::buffer::Buffer;
use vimshim::config::VimshimConfig;
use vimshim::lines;
use vimshim::sort::SortCommand;

fn run_sort(text: &str, flags: &[&str]) -> String {
    let mut buffer = Buffer::from_text(text);
    let command = SortCommand::from_tokens(flags).unwrap();
    command
        .execute(&mut buffer, &VimshimConfig::default())
        .unwrap();
    buffer.text()
}

// Property: split followed by join reproduces any non-empty text exactly
proptest! {
    #[test]
    fn split_join_round_trip(text in "[a-zA-Z0-9 \\n]{1,60}") {
        let lines = lines::split(&text, '\n');
        prop_assert_eq!(lines::join(&lines, '\n'), text);
    }
}

// Property: the round trip holds for any single-char terminator, not just \n
proptest! {
    #[test]
    fn split_join_round_trip_any_terminator(
        text in "[a-z;,\\|]{1,40}",
        terminator in prop::sample::select(&[';', ',', '|'])
    ) {
        let lines = lines::split(&text, terminator);
        prop_assert_eq!(lines::join(&lines, terminator), text);
    }
}

// Property: every split line ends with the terminator
proptest! {
    #[test]
    fn split_lines_all_carry_terminator(text in "[a-z\\n]{1,40}") {
        for line in lines::split(&text, '\n') {
            prop_assert!(line.ends_with('\n'));
        }
    }
}

// Property: lexicographic sort output is ordered
proptest! {
    #[test]
    fn lexicographic_output_is_ordered(
        input in prop::collection::vec("[a-z0-9 ]{0,8}", 1..12)
    ) {
        let text = input.join("\n");
        let output = run_sort(&text, &[]);
        let sorted_lines: Vec<&str> = output.split('\n').collect();
        for pair in sorted_lines.windows(2) {
            prop_assert!(pair[0] <= pair[1], "{:?} > {:?}", pair[0], pair[1]);
        }
    }
}

// Property: sort never loses or invents lines (without the unique flag)
proptest! {
    #[test]
    fn sort_is_a_permutation(
        input in prop::collection::vec("[a-z0-9]{0,6}", 1..12)
    ) {
        let text = input.join("\n");
        let output = run_sort(&text, &[]);

        let mut before: Vec<&str> = text.split('\n').collect();
        let mut after: Vec<&str> = output.split('\n').collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }
}

// Property: the reversed flag yields the exact reverse of the plain sort
proptest! {
    #[test]
    fn reversed_flag_mirrors_plain_sort(
        input in prop::collection::vec("[a-z0-9]{0,6}", 1..12)
    ) {
        let text = input.join("\n");
        let forward = run_sort(&text, &[]);
        let backward = run_sort(&text, &["!"]);

        let mut forward_lines: Vec<&str> = forward.split('\n').collect();
        forward_lines.reverse();
        let backward_lines: Vec<&str> = backward.split('\n').collect();
        prop_assert_eq!(forward_lines, backward_lines);
    }
}

// Property: unique output never contains a duplicate line
proptest! {
    #[test]
    fn unique_output_has_no_duplicates(
        input in prop::collection::vec("[ab]{0,2}", 1..16)
    ) {
        let text = input.join("\n");
        let output = run_sort(&text, &["u"]);
        let mut seen = std::collections::HashSet::new();
        for line in output.split('\n') {
            prop_assert!(seen.insert(line), "duplicate line {:?}", line);
        }
    }
}

// Property: sorting an already sorted buffer changes nothing
proptest! {
    #[test]
    fn sort_is_idempotent(
        input in prop::collection::vec("[a-z0-9]{0,6}", 1..12)
    ) {
        let text = input.join("\n");
        let once = run_sort(&text, &[]);
        let twice = run_sort(&once, &[]);
        prop_assert_eq!(once, twice);
    }
}

// Property: numeric sort keeps digit-free lines in their original relative order
proptest! {
    #[test]
    fn numeric_sort_preserves_unmatched_order(
        words in prop::collection::vec("[a-z]{1,5}", 1..8),
        numbers in prop::collection::vec(0u32..1000, 1..8)
    ) {
        let mut input: Vec<String> = Vec::new();
        for (i, word) in words.iter().enumerate() {
            input.push(word.clone());
            if let Some(n) = numbers.get(i) {
                input.push(n.to_string());
            }
        }
        let text = input.join("\n");
        let output = run_sort(&text, &["n"]);
        let output_lines: Vec<&str> = output.split('\n').collect();

        // The digit-free prefix is exactly the words, in input order
        let unmatched: Vec<&str> = output_lines[..words.len()].to_vec();
        let expected: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
        prop_assert_eq!(unmatched, expected);

        // The rest is the numbers, numerically ordered
        let mut expected_numbers: Vec<u32> = numbers
            .iter()
            .take(words.len())
            .copied()
            .collect();
        expected_numbers.sort_unstable();
        let sorted_numbers: Vec<u32> = output_lines[words.len()..]
            .iter()
            .map(|l| l.parse().unwrap())
            .collect();
        prop_assert_eq!(sorted_numbers, expected_numbers);
    }
}
