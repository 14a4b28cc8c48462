/// Split `input` on any character in `delims`, treating a `"`-delimited run
/// as a single field whose surrounding quotes are stripped and whose
/// internal delimiter/whitespace characters are preserved. Used by the CSV
/// reader, where the field delimiter is a configurable character rather
/// than the SQL lexer's fixed punctuation set.
pub fn split_quoted(input: &str, delims: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let n = chars.len();

    while i < n {
        while i < n && delims.contains(chars[i]) {
            i += 1;
        }
        if i >= n {
            break;
        }

        if chars[i] == '"' {
            let start = i + 1;
            let mut j = start;
            while j < n && chars[j] != '"' {
                j += 1;
            }
            let end = j.min(n);
            tokens.push(chars[start..end].iter().collect());
            i = if j < n { j + 1 } else { n };
        } else {
            let start = i;
            while i < n && !delims.contains(chars[i]) {
                i += 1;
            }
            tokens.push(chars[start..i].iter().collect());
        }
    }

    tokens
}
