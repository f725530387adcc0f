//! Generated `README.txt`. Informational only; not covered by the ledger.

use crate::manifest::Manifest;
use crate::paths::layout;

pub fn render_readme(manifest: &Manifest) -> String {
    format!(
        "AIFX Container (AIFM)\n\
         -------------------\n\
         Title: {title}\n\
         Created At (UTC): {created_at}\n\
         Verification Tier: {tier}\n\
         \n\
         This container is a ZIP-based AIFX format.\n\
         Authoritative metadata is in: {manifest_path}\n\
         Integrity hashes are in: {checksums_path}\n\
         This README is non-authoritative.\n",
        title = manifest.title,
        created_at = manifest.created_at,
        tier = manifest.verification.tier,
        manifest_path = layout::MANIFEST,
        checksums_path = layout::CHECKSUMS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{build_manifest, Tier};
    use crate::options::ConvertOptions;
    use chrono::TimeZone;

    #[test]
    fn readme_mentions_title_time_and_tier() {
        let opts = ConvertOptions::new("a.wav", "out")
            .with_title("Night Drive")
            .with_tier(Tier::Vc);
        let at = chrono::Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 5).unwrap();
        let text = render_readme(&build_manifest(&opts, at));

        assert!(text.starts_with("AIFX Container (AIFM)\n-------------------\n"));
        assert!(text.contains("Title: Night Drive\n"));
        assert!(text.contains("Created At (UTC): 2025-03-01T12:00:05Z\n"));
        assert!(text.contains("Verification Tier: VC\n\n"));
        assert!(text.ends_with("This README is non-authoritative.\n"));
    }
}
