//! Enum wrapper for fingerprint module dispatch.
//!
//! Native async trait methods (Edition 2024 RPITIT) are not object-safe,
//! so the dispatch service cannot hold `Box<dyn FingerprintModule>`. This
//! enum provides concrete type dispatch over the known module types
//! instead, keeping the zero-cost monomorphized calls.

use imprint_core::{
    AuthenticationListener, CancellationToken, CryptoContext, FingerprintModule, ModuleTag,
    Result,
};
use imprint_platform::PlatformModule;
use imprint_veridex::VeridexModule;

/// A registered fingerprint module of any supported type.
///
/// Candidates are conventionally offered to the service in this order:
/// Veridex first, platform second: a device that ships the vendor stack
/// should use it.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyFingerprintModule {
    /// Proprietary Veridex SDK module.
    Veridex(VeridexModule),

    /// Platform biometric service module.
    Platform(PlatformModule),
}

impl FingerprintModule for AnyFingerprintModule {
    fn tag(&self) -> ModuleTag {
        match self {
            Self::Veridex(module) => module.tag(),
            Self::Platform(module) => module.tag(),
        }
    }

    async fn is_hardware_present(&self) -> bool {
        match self {
            Self::Veridex(module) => module.is_hardware_present().await,
            Self::Platform(module) => module.is_hardware_present().await,
        }
    }

    async fn has_fingerprint_registered(&self) -> Result<bool> {
        match self {
            Self::Veridex(module) => module.has_fingerprint_registered().await,
            Self::Platform(module) => module.has_fingerprint_registered().await,
        }
    }

    async fn authenticate(
        &mut self,
        cancellation: CancellationToken,
        crypto: Option<&CryptoContext>,
        listener: &mut dyn AuthenticationListener,
        restart_on_non_fatal: bool,
    ) -> Result<()> {
        match self {
            Self::Veridex(module) => {
                module
                    .authenticate(cancellation, crypto, listener, restart_on_non_fatal)
                    .await
            }
            Self::Platform(module) => {
                module
                    .authenticate(cancellation, crypto, listener, restart_on_non_fatal)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_any_module_veridex_tag() {
        let (module, _handle) = VeridexModule::with_mock();
        let any = AnyFingerprintModule::Veridex(module);
        assert_eq!(any.tag(), imprint_veridex::module::TAG);
    }

    #[tokio::test]
    async fn test_any_module_platform_tag() {
        let (module, _handle) = PlatformModule::with_mock();
        let any = AnyFingerprintModule::Platform(module);
        assert_eq!(any.tag(), imprint_platform::module::TAG);
    }

    #[tokio::test]
    async fn test_any_module_delegates_presence() {
        let (module, handle) = VeridexModule::with_mock();
        let any = AnyFingerprintModule::Veridex(module);

        assert!(any.is_hardware_present().await);
        handle.set_feature_enabled(false);
        assert!(!any.is_hardware_present().await);
    }
}
