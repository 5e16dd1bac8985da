use subtle::ConstantTimeEq;

use crate::{models::totp::Totp, Error, Result};

impl Totp {
    /// Whether TOTP information is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Totp::Disabled)
    }

    /// Whether a confirmed TOTP credential gates login
    pub fn is_active(&self) -> bool {
        matches!(self, Totp::Enabled { .. })
    }

    /// Whether enrollment has started but is not yet confirmed
    pub fn is_pending(&self) -> bool {
        matches!(self, Totp::Pending { .. })
    }

    /// Decode the stored base32 secret
    fn secret_bytes(&self) -> Result<Vec<u8>> {
        if let Totp::Enabled { secret, .. } | Totp::Pending { secret } = &self {
            base32::decode(base32::Alphabet::RFC4648 { padding: false }, secret)
                .ok_or(Error::OperationFailed)
        } else {
            Err(Error::OperationFailed)
        }
    }

    /// Generate the TOTP code for a given unix timestamp
    pub fn generate_code_at(&self, seconds: u64) -> Result<String> {
        Ok(totp_lite::totp_custom::<totp_lite::Sha1>(
            totp_lite::DEFAULT_STEP,
            6,
            &self.secret_bytes()?,
            seconds,
        ))
    }

    // Generate a TOTP code from secret
    pub fn generate_code(&self) -> Result<String> {
        let seconds: u64 = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        self.generate_code_at(seconds)
    }

    /// Check a submitted code against the time step containing `seconds`
    ///
    /// The immediately adjacent steps are accepted to tolerate clock drift;
    /// nothing wider. Comparison runs in constant time and does not short
    /// circuit across the window.
    pub fn verify_code_at(&self, code: &str, seconds: u64) -> bool {
        let secret = match self.secret_bytes() {
            Ok(secret) => secret,
            Err(_) => return false,
        };

        let mut matched = false;
        for at in [
            seconds.saturating_sub(totp_lite::DEFAULT_STEP),
            seconds,
            seconds + totp_lite::DEFAULT_STEP,
        ] {
            let expected =
                totp_lite::totp_custom::<totp_lite::Sha1>(totp_lite::DEFAULT_STEP, 6, &secret, at);

            matched |= bool::from(expected.as_bytes().ct_eq(code.as_bytes()));
        }

        matched
    }

    /// Check a submitted code against the current time step
    pub fn verify_code(&self, code: &str) -> bool {
        let seconds: u64 = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        self.verify_code_at(code, seconds)
    }

    /// Build the otpauth:// URI used for authenticator-app enrollment
    pub fn provisioning_uri(&self, issuer: &str, account: &str) -> Result<String> {
        if let Totp::Enabled { secret, .. } | Totp::Pending { secret } = &self {
            Ok(format!(
                "otpauth://totp/{issuer}:{account}?secret={secret}&issuer={issuer}"
            ))
        } else {
            Err(Error::OperationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SECRET: &str = "JBSWY3DPEHPK3PXP";

    fn pending() -> Totp {
        Totp::Pending {
            secret: SECRET.to_string(),
        }
    }

    #[test]
    fn it_accepts_the_current_step() {
        let totp = pending();
        let code = totp.generate_code_at(1_000_000).unwrap();

        assert!(totp.verify_code_at(&code, 1_000_000));
        assert!(totp.verify_code_at(&code, 1_000_029));
    }

    #[test]
    fn it_accepts_only_adjacent_steps() {
        let totp = pending();
        let code = totp.generate_code_at(1_000_000).unwrap();

        assert!(totp.verify_code_at(&code, 1_000_000 - 30));
        assert!(totp.verify_code_at(&code, 1_000_000 + 30));
        assert!(!totp.verify_code_at(&code, 1_000_000 - 90));
        assert!(!totp.verify_code_at(&code, 1_000_000 + 90));
    }

    #[test]
    fn it_rejects_wrong_codes() {
        let totp = pending();
        let code = totp.generate_code_at(1_000_000).unwrap();

        let wrong: String = code
            .chars()
            .map(|c| if c == '0' { '1' } else { '0' })
            .collect();

        assert!(!totp.verify_code_at(&wrong, 1_000_000));
        assert!(!totp.verify_code_at("", 1_000_000));
    }

    #[test]
    fn it_never_verifies_when_disabled() {
        let totp = Totp::Disabled;

        assert!(!totp.verify_code_at("000000", 1_000_000));
        assert!(totp.generate_code_at(1_000_000).is_err());
    }

    #[test]
    fn it_builds_a_provisioning_uri() {
        let uri = pending().provisioning_uri("Example", "user@example.com").unwrap();

        assert_eq!(
            uri,
            "otpauth://totp/Example:user@example.com?secret=JBSWY3DPEHPK3PXP&issuer=Example"
        );

        assert!(Totp::Disabled
            .provisioning_uri("Example", "user@example.com")
            .is_err());
    }
}
