//! Client-side validation. Every rule here runs before a request is built;
//! a failure is surfaced in the snackbar and no network call happens.

/// The one strict numeric rule for deposit/withdraw/transfer amounts: the
/// trimmed input must parse as a finite number strictly greater than zero.
pub fn parse_amount(input: &str) -> Option<f64> {
    let amount: f64 = input.trim().parse().ok()?;
    if amount.is_finite() && amount > 0.0 {
        Some(amount)
    } else {
        None
    }
}

/// 18 characters: 17 ASCII digits followed by a digit or X.
pub fn is_valid_id_card(id_card: &str) -> bool {
    let bytes = id_card.as_bytes();
    bytes.len() == 18
        && bytes[..17].iter().all(u8::is_ascii_digit)
        && (bytes[17].is_ascii_digit() || bytes[17] == b'X' || bytes[17] == b'x')
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 11 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Length gate used by the availability check.
pub fn is_checkable_card_number(card: &str) -> bool {
    (16..=19).contains(&card.len())
}

#[derive(Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub id_card: String,
    pub phone: String,
    pub address: String,
    pub card_number: String,
    pub password: String,
    pub confirm_password: String,
    pub initial_deposit: String,
}

/// Field-by-field validation in fixed order. The first failing rule wins,
/// so an empty name is reported even when later fields are also invalid.
pub fn validate_registration(form: &RegistrationForm) -> Result<f64, &'static str> {
    if form.name.trim().is_empty() {
        return Err("请输入姓名");
    }
    if !is_valid_id_card(form.id_card.trim()) {
        return Err("请输入有效的18位身份证号");
    }
    if !is_valid_phone(form.phone.trim()) {
        return Err("请输入有效的11位手机号码");
    }
    if form.card_number.trim().len() < 16 {
        return Err("请输入有效的卡号");
    }
    if form.password.len() < 6 {
        return Err("密码至少6位");
    }
    let deposit: f64 = match form.initial_deposit.trim().parse() {
        Ok(value) => value,
        Err(_) => return Err("请输入有效的开户金额"),
    };
    if !deposit.is_finite() || deposit < 0.0 {
        return Err("存款金额不能为负数");
    }
    Ok(deposit)
}

/// Profile edit uses the registration rules for the shared fields.
pub fn validate_profile_update(name: &str, id_card: &str, phone: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("请输入姓名");
    }
    if !is_valid_id_card(id_card.trim()) {
        return Err("请输入有效的18位身份证号");
    }
    if !is_valid_phone(phone.trim()) {
        return Err("请输入有效的11位手机号码");
    }
    Ok(())
}

pub fn validate_password_change(
    old_password: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<(), &'static str> {
    if old_password.is_empty() || new_password.is_empty() {
        return Err("请输入原密码和新密码");
    }
    if new_password.len() < 6 {
        return Err("新密码至少6位");
    }
    if new_password != confirm_password {
        return Err("两次输入的密码不一致");
    }
    Ok(())
}

/// Step-one gate of the transfer flow, checked before the recipient query
/// is issued.
pub fn validate_transfer_target(own_card: &str, to_card: &str) -> Result<(), &'static str> {
    if to_card.trim().is_empty() {
        return Err("请输入对方卡号");
    }
    if to_card.trim() == own_card {
        return Err("不能转账给自己");
    }
    Ok(())
}

/// Final gate of the transfer flow: submission requires a recipient name
/// confirmed by the query step.
pub fn can_submit_transfer(recipient: Option<&str>) -> Result<(), &'static str> {
    match recipient {
        Some(_) => Ok(()),
        None => Err("请先查询收款人信息"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_must_be_strictly_positive_numbers() {
        assert_eq!(parse_amount("100"), Some(100.0));
        assert_eq!(parse_amount(" 0.01 "), Some(0.01));
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn id_card_is_17_digits_plus_digit_or_x() {
        assert!(is_valid_id_card("11010119900101123X"));
        assert!(is_valid_id_card("11010119900101123x"));
        assert!(is_valid_id_card("110101199001011234"));
        assert!(!is_valid_id_card("11010119900101123"));
        assert!(!is_valid_id_card("1101011990010112345"));
        assert!(!is_valid_id_card("11010119900101123Y"));
        assert!(!is_valid_id_card("X1010119900101123X"));
    }

    #[test]
    fn phone_is_11_digits() {
        assert!(is_valid_phone("13800138000"));
        assert!(!is_valid_phone("1380013800"));
        assert!(!is_valid_phone("138001380001"));
        assert!(!is_valid_phone("1380013800a"));
    }

    #[test]
    fn card_availability_check_accepts_16_to_19_chars() {
        assert!(!is_checkable_card_number("123456789012345"));
        assert!(is_checkable_card_number("1234567890123456"));
        assert!(is_checkable_card_number("1234567890123456789"));
        assert!(!is_checkable_card_number("12345678901234567890"));
    }

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "张三".to_string(),
            id_card: "11010119900101123X".to_string(),
            phone: "13800138000".to_string(),
            address: "".to_string(),
            card_number: "6222020000000001".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            initial_deposit: "100".to_string(),
        }
    }

    #[test]
    fn a_valid_form_yields_the_parsed_deposit() {
        assert_eq!(validate_registration(&valid_form()), Ok(100.0));
        let mut free = valid_form();
        free.initial_deposit = "0".to_string();
        assert_eq!(validate_registration(&free), Ok(0.0));
    }

    #[test]
    fn registration_errors_surface_in_field_order() {
        // Everything is wrong; the name error must win.
        let form = RegistrationForm {
            name: " ".to_string(),
            id_card: "bad".to_string(),
            phone: "bad".to_string(),
            card_number: "short".to_string(),
            password: "x".to_string(),
            initial_deposit: "-1".to_string(),
            ..Default::default()
        };
        assert_eq!(validate_registration(&form), Err("请输入姓名"));

        let mut form = valid_form();
        form.id_card = "123".to_string();
        form.phone = "bad".to_string();
        assert_eq!(validate_registration(&form), Err("请输入有效的18位身份证号"));

        let mut form = valid_form();
        form.phone = "123".to_string();
        assert_eq!(validate_registration(&form), Err("请输入有效的11位手机号码"));

        let mut form = valid_form();
        form.card_number = "123".to_string();
        assert_eq!(validate_registration(&form), Err("请输入有效的卡号"));

        let mut form = valid_form();
        form.password = "12345".to_string();
        assert_eq!(validate_registration(&form), Err("密码至少6位"));

        let mut form = valid_form();
        form.initial_deposit = "-0.01".to_string();
        assert_eq!(validate_registration(&form), Err("存款金额不能为负数"));

        let mut form = valid_form();
        form.initial_deposit = "abc".to_string();
        assert_eq!(validate_registration(&form), Err("请输入有效的开户金额"));
    }

    #[test]
    fn profile_update_reuses_the_shared_rules() {
        assert_eq!(
            validate_profile_update("张三", "11010119900101123X", "13800138000"),
            Ok(())
        );
        assert_eq!(
            validate_profile_update("", "11010119900101123X", "13800138000"),
            Err("请输入姓名")
        );
        assert_eq!(
            validate_profile_update("张三", "nope", "13800138000"),
            Err("请输入有效的18位身份证号")
        );
    }

    #[test]
    fn password_change_requires_matching_confirmation() {
        assert_eq!(validate_password_change("old", "newpass", "newpass"), Ok(()));
        assert_eq!(
            validate_password_change("", "newpass", "newpass"),
            Err("请输入原密码和新密码")
        );
        assert_eq!(
            validate_password_change("old", "short", "short"),
            Err("新密码至少6位")
        );
        assert_eq!(
            validate_password_change("old", "newpass", "different"),
            Err("两次输入的密码不一致")
        );
    }

    #[test]
    fn transfer_target_rejects_empty_and_self() {
        let own = "6222020000000001";
        assert_eq!(validate_transfer_target(own, "6222020000000002"), Ok(()));
        assert_eq!(validate_transfer_target(own, ""), Err("请输入对方卡号"));
        assert_eq!(validate_transfer_target(own, own), Err("不能转账给自己"));
    }

    #[test]
    fn transfer_submit_requires_a_queried_recipient() {
        assert_eq!(can_submit_transfer(Some("张三")), Ok(()));
        assert_eq!(can_submit_transfer(None), Err("请先查询收款人信息"));
    }
}
