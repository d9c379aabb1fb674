//! # Validate Subcommand
//!
//! Checks one value against the rule for one field, exactly as the form
//! does on submit.

use clap::Args;

use udyam_core::validation::{self, FieldViolation};
use udyam_core::Field;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Field name: identityNumber, mobileNumber, otp, taxId, fullName, dateOfBirth.
    /// Kebab and snake case are accepted too.
    #[arg(value_parser = parse_field)]
    pub field: Field,

    /// Value to check.
    pub value: String,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_field(raw: &str) -> Result<Field, String> {
    raw.parse::<Field>().map_err(|e| e.to_string())
}

/// Check `value` against `field`'s rule. Tax ids are compared uppercased,
/// the way the form stores them.
pub fn validate_value(field: Field, value: &str) -> Result<(), FieldViolation> {
    if field.uppercased() {
        validation::check(field, &value.to_uppercase())
    } else {
        validation::check(field, value)
    }
}

/// Run the subcommand. Returns whether the value passed.
pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<bool> {
    let result = validate_value(args.field, &args.value);
    if args.json {
        let report = match &result {
            Ok(()) => serde_json::json!({ "field": args.field.as_str(), "valid": true }),
            Err(v) => serde_json::json!({
                "field": args.field.as_str(),
                "valid": false,
                "message": v.message,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &result {
            Ok(()) => println!("{}: ok", args.field.label()),
            Err(v) => println!("{}: {}", args.field.label(), v.message),
        }
    }
    Ok(result.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ValidateArgs,
    }

    #[test]
    fn parses_field_aliases() {
        let h = Harness::try_parse_from(["x", "tax-id", "abcde1234f"]).unwrap();
        assert_eq!(h.args.field, Field::TaxId);
        let h = Harness::try_parse_from(["x", "mobile_number", "9876543210", "--json"]).unwrap();
        assert_eq!(h.args.field, Field::MobileNumber);
        assert!(h.args.json);
    }

    #[test]
    fn rejects_unknown_field() {
        assert!(Harness::try_parse_from(["x", "pincode", "110001"]).is_err());
    }

    #[test]
    fn tax_id_is_uppercased_before_checking() {
        assert!(validate_value(Field::TaxId, "abcde1234f").is_ok());
    }

    #[test]
    fn mobile_must_start_with_six_to_nine() {
        let err = validate_value(Field::MobileNumber, "5876543210").unwrap_err();
        assert_eq!(err.message, "Mobile number must start with 6-9 and be 10 digits");
    }

    #[test]
    fn date_of_birth_must_parse() {
        assert!(validate_value(Field::DateOfBirth, "1990-04-12").is_ok());
        assert!(validate_value(Field::DateOfBirth, "12/04/1990").is_err());
        assert!(validate_value(Field::DateOfBirth, "").is_err());
    }
}
