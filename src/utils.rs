/// Repeats every item as many times as its weight, ready for a uniform draw.
pub fn weighted_choices<T: Clone>(weights: impl IntoIterator<Item = (T, usize)>) -> Vec<T> {
    weights
        .into_iter()
        .flat_map(|(item, weight)| std::iter::repeat(item).take(weight))
        .collect()
}

pub fn oxford_comma<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => format!(
            "{}, and {}",
            init.iter().map(|s| s.as_ref()).collect::<Vec<&str>>().join(", "),
            last.as_ref()
        ),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn t_oxford_comma() {
        let empty: [&str; 0] = [];
        assert_eq!(oxford_comma(&empty), "");
        assert_eq!(oxford_comma(&["a"]), "a");
        assert_eq!(oxford_comma(&["a", "b"]), "a and b");
        assert_eq!(oxford_comma(&["a", "b", "c"]), "a, b, and c");
        assert_eq!(oxford_comma(&["a", "b", "c", "d"]), "a, b, c, and d");
    }

    #[test]
    fn t_weighted_choices() {
        let choices = weighted_choices(vec![("b", 2), ("p", 0), ("m", 1)]);
        assert_eq!(choices, vec!["b", "b", "m"]);
    }
}
