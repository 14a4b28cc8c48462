/// Tokenize a query into whitespace- and quote-aware words, with `(`, `)`,
/// and `,` always split out as their own tokens regardless of surrounding
/// whitespace. Splitting structural punctuation out up front means a
/// quoted multi-word value immediately followed by a comma (no
/// intervening whitespace) still gets its comma detached correctly,
/// which gluing punctuation onto the preceding word and re-splitting it
/// later would not.
pub fn tokenize(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let n = chars.len();

    while i < n {
        while i < n && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= n {
            break;
        }

        match chars[i] {
            '"' => {
                let start = i + 1;
                let mut j = start;
                while j < n && chars[j] != '"' {
                    j += 1;
                }
                let end = j.min(n);
                tokens.push(chars[start..end].iter().collect());
                i = if j < n { j + 1 } else { n };
            }
            '(' | ')' | ',' => {
                tokens.push(chars[i].to_string());
                i += 1;
            }
            _ => {
                let start = i;
                while i < n
                    && !chars[i].is_whitespace()
                    && !matches!(chars[i], '"' | '(' | ')' | ',')
                {
                    i += 1;
                }
                tokens.push(chars[start..i].iter().collect());
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_punctuation_from_barewords() {
        assert_eq!(
            tokenize("INSERT INTO t VALUES (alice, 30)"),
            vec!["INSERT", "INTO", "t", "VALUES", "(", "alice", ",", "30", ")"]
        );
    }

    #[test]
    fn keeps_quoted_multiword_values_as_one_token_with_trailing_comma_detached() {
        assert_eq!(
            tokenize(r#"INSERT INTO t VALUES ("alicia ann", 22)"#),
            vec!["INSERT", "INTO", "t", "VALUES", "(", "alicia ann", ",", "22", ")"]
        );
    }

    #[test]
    fn comparison_operators_arrive_as_standalone_words() {
        assert_eq!(
            tokenize("WHERE age > 35"),
            vec!["WHERE", "age", ">", "35"]
        );
        assert_eq!(tokenize("name != bob"), vec!["name", "!=", "bob"]);
    }

    #[test]
    fn create_table_coldefs_tokenize_cleanly() {
        assert_eq!(
            tokenize("CREATE TABLE t (name string, age int32)"),
            vec![
                "CREATE", "TABLE", "t", "(", "name", "string", ",", "age", "int32", ")"
            ]
        );
    }
}
