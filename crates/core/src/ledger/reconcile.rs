//! Reconciliation of point balances and project pricing into the ledger.

use pointfolio_feeds::PointBalance;

use super::matching::{find_project, project_matches_asset};
use super::LedgerAsset;
use crate::projects::{Project, ProjectRegistry};

/// New ledger produced by [`reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub assets: Vec<LedgerAsset>,
    pub created: usize,
    pub updated: usize,
}

impl Reconciliation {
    /// True when any row changed in value or membership.
    pub fn changed(&self) -> bool {
        self.created > 0 || self.updated > 0
    }
}

/// Merges a points snapshot into `ledger`, pricing every row against `registry`.
///
/// Balances are matched to rows by exact name. Rows absent from the snapshot
/// keep their quantity and membership but are still re-priced. Values are only
/// assigned when they differ numerically, so running this twice on the same
/// inputs leaves the second result identical to the first.
pub fn reconcile(
    points: &[PointBalance],
    registry: &ProjectRegistry,
    ledger: &[LedgerAsset],
) -> Reconciliation {
    let original = ledger.len();
    let mut assets = ledger.to_vec();

    for balance in points {
        match assets.iter_mut().find(|asset| asset.name == balance.name) {
            Some(asset) => {
                asset.set_quantity(balance.quantity);
            }
            None => assets.push(LedgerAsset::new(balance.name.clone(), balance.quantity)),
        }
    }

    for asset in assets.iter_mut() {
        price_asset(asset, registry);
    }

    let updated = assets
        .iter()
        .zip(ledger)
        .filter(|(after, before)| after != before)
        .count();

    Reconciliation {
        created: assets.len() - original,
        updated,
        assets,
    }
}

/// Resolves `price` and `has_project` for one asset. Returns whether it changed.
pub(crate) fn price_asset(asset: &mut LedgerAsset, registry: &ProjectRegistry) -> bool {
    match find_project(registry, &asset.name) {
        Some(project) => asset.link(project.point_price),
        None => asset.unlink(),
    }
}

/// Renames every asset matching `old_name` to `project`'s name and links it
/// to the project's current price. Returns the number of renamed assets.
pub fn rename_assets(assets: &mut [LedgerAsset], old_name: &str, project: &Project) -> usize {
    let mut renamed = 0;
    for asset in assets
        .iter_mut()
        .filter(|asset| project_matches_asset(old_name, &asset.name))
    {
        asset.name = project.name.clone();
        asset.link(project.point_price);
        renamed += 1;
    }
    renamed
}

/// Unprices every asset matching `project_name`. Quantities are untouched.
pub fn unlink_assets(assets: &mut [LedgerAsset], project_name: &str) -> usize {
    assets
        .iter_mut()
        .filter(|asset| project_matches_asset(project_name, &asset.name))
        .map(|asset| asset.unlink())
        .filter(|changed| *changed)
        .count()
}
