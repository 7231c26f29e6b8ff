/// Title-case a label the way catalog names are displayed: the first letter of
/// every alphabetic run is upper-cased, the rest lower-cased.
///
/// `"desk chair"` becomes `"Desk Chair"` and `"usb-c cable"` becomes `"Usb-C Cable"`.
pub fn title_case(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut previous_alphabetic = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            titled.push(c);
            previous_alphabetic = false;
        }
    }
    titled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("desk chair"), "Desk Chair");
        assert_eq!(title_case("ELECTRONICS"), "Electronics");
        assert_eq!(title_case("usb-c cable"), "Usb-C Cable");
        assert_eq!(title_case("o'neil 2go"), "O'Neil 2Go");
        assert_eq!(title_case(""), "");
    }
}
