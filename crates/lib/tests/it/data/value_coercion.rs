use chrono::NaiveDate;
use docbind::{
    DataError,
    data::{Element, Scalar, ScalarType},
};
use rust_decimal::Decimal;

fn payment() -> docbind::Data {
    Element::new("Payment")
        .attribute("partialPayment", "1")
        .child(Element::new("PaidAmount").text("1210.50"))
        .child(Element::new("PaymentMeansCode").text("42"))
        .child(Element::new("DueDate").text("2024-04-15"))
        .child(Element::new("Reminder"))
        .child(Element::new("Confirmed").bool(true))
        .into_data()
}

#[test]
fn test_typed_reads() {
    let data = payment();

    assert!(data.get_value("@partialPayment").unwrap().to_bool().unwrap());
    assert_eq!(data.get_value("PaymentMeansCode").unwrap().to_int().unwrap(), 42);
    assert_eq!(
        data.get_value("PaidAmount").unwrap().to_decimal().unwrap(),
        Decimal::new(121050, 2)
    );
    assert_eq!(data.get_value("PaidAmount").unwrap().to_number().unwrap(), 1210.5);
    assert!(data.get_value("Confirmed").unwrap().to_bool().unwrap());
}

#[test]
fn test_dates() {
    let data = payment();
    assert_eq!(
        data.get_value("DueDate").unwrap().to_date().unwrap(),
        NaiveDate::from_ymd_opt(2024, 4, 15)
    );
    // Present but empty coerces to no date, not to an error
    assert_eq!(data.get_value("Reminder").unwrap().to_date().unwrap(), None);

    let err = data.get_value("PaidAmount").unwrap().to_date().unwrap_err();
    assert_eq!(
        err,
        DataError::InvalidFormat {
            expected: "date".to_string(),
            value: "1210.50".to_string(),
            path: "/Payment/PaidAmount".to_string(),
        }
    );
}

#[test]
fn test_invalid_format_carries_location() {
    let data = payment();
    let err = data.get_value("DueDate").unwrap().to_int().unwrap_err();
    assert!(err.is_format_error());
    assert_eq!(err.path(), Some("/Payment/DueDate"));

    let err = data.get_value("Confirmed").unwrap().to_number().unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn test_cast_by_declared_type() {
    let data = payment();
    let code = data.get_value("PaymentMeansCode").unwrap();

    assert_eq!(code.cast(ScalarType::Int).unwrap(), Scalar::Int(42));
    assert_eq!(code.cast_named("decimal").unwrap(), Scalar::Decimal(Decimal::from(42)));
    assert_eq!(code.cast_named("string").unwrap(), Scalar::String("42".to_string()));
    assert!(code.cast_named("bool").unwrap_err().is_format_error());

    let err = code.cast_named("currency").unwrap_err();
    assert_eq!(
        err,
        DataError::UnsupportedType {
            name: "currency".to_string()
        }
    );
}
