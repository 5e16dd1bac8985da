use iso8601_timestamp::Timestamp;

use crate::{
    config::TwoFactorConfig,
    models::{totp::Totp, BackupCode, SecondFactor, TwoFactorAuthentication},
    util::hash_backup_code,
    Error, Result,
};

mod totp;

impl TwoFactorAuthentication {
    /// Whether a confirmed second factor gates login
    pub fn is_active(&self) -> bool {
        self.totp.is_active()
    }

    /// Begin TOTP enrollment with a fresh secret
    ///
    /// The returned secret is also kept on the pending credential so the
    /// user can retry scanning; it gains no authentication power until
    /// confirmed.
    pub fn generate_totp_secret(&mut self) -> Result<String> {
        if self.totp.is_active() {
            return Err(Error::AlreadyEnabled);
        }

        let secret: [u8; 10] = rand::random();
        let secret = base32::encode(base32::Alphabet::RFC4648 { padding: false }, &secret);

        self.totp = Totp::Pending {
            secret: secret.clone(),
        };

        Ok(secret)
    }

    /// Confirm enrollment with the first valid code
    ///
    /// Activates TOTP and issues the initial backup code set. A wrong code
    /// keeps the pending secret so the user may try again.
    pub fn confirm_totp(
        &mut self,
        code: &str,
        at_seconds: u64,
        config: &TwoFactorConfig,
    ) -> Result<Vec<String>> {
        match &self.totp {
            Totp::Pending { secret } => {
                let secret = secret.clone();

                if !self.totp.verify_code_at(code, at_seconds) {
                    return Err(Error::InvalidCode);
                }

                self.totp = Totp::Enabled {
                    secret,
                    confirmed_at: Timestamp::now_utc(),
                };

                self.generate_backup_codes(config)
            }
            _ => Err(Error::NoPendingSetup),
        }
    }

    /// Replace all backup codes with a fresh set
    ///
    /// Returns the plaintext codes exactly once; only their hashes are kept.
    pub fn generate_backup_codes(&mut self, config: &TwoFactorConfig) -> Result<Vec<String>> {
        static ALPHABET: [char; 32] = [
            '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
            'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w', 'x', 'y', 'z',
        ];

        let mut codes: Vec<String> = vec![];
        while codes.len() < config.backup_code_count {
            let code = format!(
                "{}-{}",
                nanoid!(5, &ALPHABET),
                nanoid!(5, &ALPHABET)
            );

            if !codes.contains(&code) {
                codes.push(code);
            }
        }

        self.backup_codes = codes
            .iter()
            .map(|code| {
                Ok(BackupCode {
                    code_hash: hash_backup_code(code)?,
                    used: false,
                })
            })
            .collect::<Result<Vec<BackupCode>>>()?;

        Ok(codes)
    }

    /// Remove the TOTP credential and all backup codes
    pub fn wipe(&mut self) {
        self.totp = Totp::Disabled;
        self.backup_codes = vec![];
    }

    /// Match a submitted second factor
    ///
    /// TOTP is tried first, then unused backup codes by hash. An unconfirmed
    /// credential never matches anything.
    pub fn match_second_factor(&self, code: &str, at_seconds: u64) -> Result<SecondFactor> {
        if !self.is_active() {
            return Err(Error::InvalidCode);
        }

        if self.totp.verify_code_at(code, at_seconds) {
            return Ok(SecondFactor::Totp);
        }

        for backup in self.backup_codes.iter().filter(|backup| !backup.used) {
            if argon2::verify_encoded(&backup.code_hash, code.as_bytes()).unwrap_or(false) {
                return Ok(SecondFactor::BackupCode {
                    code_hash: backup.code_hash.clone(),
                });
            }
        }

        Err(Error::InvalidCode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TwoFactorConfig {
        TwoFactorConfig::default()
    }

    #[test]
    fn it_enrolls_and_confirms() {
        let mut mfa = TwoFactorAuthentication::default();
        let secret = mfa.generate_totp_secret().unwrap();

        assert!(mfa.totp.is_pending());
        assert!(!mfa.is_active());

        let code = mfa.totp.generate_code_at(1_000_000).unwrap();
        let backup_codes = mfa.confirm_totp(&code, 1_000_000, &config()).unwrap();

        assert!(mfa.is_active());
        assert_eq!(backup_codes.len(), 10);

        if let Totp::Enabled { secret: kept, .. } = &mfa.totp {
            assert_eq!(kept, &secret);
        } else {
            panic!("expected `Totp::Enabled`");
        }
    }

    #[test]
    fn it_keeps_the_pending_secret_on_a_wrong_code() {
        let mut mfa = TwoFactorAuthentication::default();
        mfa.generate_totp_secret().unwrap();

        assert_eq!(
            mfa.confirm_totp("000000", 1_000_000, &config()),
            Err(Error::InvalidCode)
        );

        assert!(mfa.totp.is_pending());

        let code = mfa.totp.generate_code_at(1_000_000).unwrap();
        assert!(mfa.confirm_totp(&code, 1_000_000, &config()).is_ok());
    }

    #[test]
    fn it_requires_a_pending_setup_to_confirm() {
        let mut mfa = TwoFactorAuthentication::default();

        assert_eq!(
            mfa.confirm_totp("000000", 1_000_000, &config()),
            Err(Error::NoPendingSetup)
        );
    }

    #[test]
    fn it_refuses_to_enroll_twice() {
        let mut mfa = TwoFactorAuthentication::default();
        mfa.generate_totp_secret().unwrap();

        let code = mfa.totp.generate_code_at(1_000_000).unwrap();
        mfa.confirm_totp(&code, 1_000_000, &config()).unwrap();

        assert_eq!(mfa.generate_totp_secret(), Err(Error::AlreadyEnabled));
    }

    #[test]
    fn it_issues_distinct_hashed_backup_codes() {
        let mut mfa = TwoFactorAuthentication::default();
        let codes = mfa.generate_backup_codes(&config()).unwrap();

        assert_eq!(codes.len(), 10);

        let mut unique = codes.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 10);

        for (code, backup) in codes.iter().zip(&mfa.backup_codes) {
            assert_ne!(code, &backup.code_hash);
            assert!(argon2::verify_encoded(&backup.code_hash, code.as_bytes()).unwrap());
        }
    }

    #[test]
    fn it_matches_totp_and_backup_codes() {
        let mut mfa = TwoFactorAuthentication::default();
        mfa.generate_totp_secret().unwrap();

        let code = mfa.totp.generate_code_at(1_000_000).unwrap();
        let backup_codes = mfa.confirm_totp(&code, 1_000_000, &config()).unwrap();

        assert_eq!(
            mfa.match_second_factor(&code, 1_000_000),
            Ok(SecondFactor::Totp)
        );

        assert!(matches!(
            mfa.match_second_factor(&backup_codes[0], 1_000_000),
            Ok(SecondFactor::BackupCode { .. })
        ));

        assert_eq!(
            mfa.match_second_factor("junk", 1_000_000),
            Err(Error::InvalidCode)
        );
    }

    #[test]
    fn it_ignores_spent_backup_codes() {
        let mut mfa = TwoFactorAuthentication::default();
        mfa.generate_totp_secret().unwrap();

        let code = mfa.totp.generate_code_at(1_000_000).unwrap();
        let backup_codes = mfa.confirm_totp(&code, 1_000_000, &config()).unwrap();

        mfa.backup_codes[0].used = true;

        assert_eq!(
            mfa.match_second_factor(&backup_codes[0], 1_000_000),
            Err(Error::InvalidCode)
        );
    }

    #[test]
    fn it_grants_nothing_while_pending() {
        let mut mfa = TwoFactorAuthentication::default();
        mfa.generate_totp_secret().unwrap();

        // A valid code for an unconfirmed secret must not count
        let code = mfa.totp.generate_code_at(1_000_000).unwrap();

        assert_eq!(
            mfa.match_second_factor(&code, 1_000_000),
            Err(Error::InvalidCode)
        );
    }
}
