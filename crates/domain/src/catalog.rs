// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{CatalogLaborRate, CatalogMaterial, MaterialCategory};
use std::collections::{BTreeMap, HashMap};

/// Immutable snapshot of the active catalog, grouped for lookup.
///
/// Materials keep their input order within each category so selection is
/// first-match in the order the rows were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    materials: BTreeMap<MaterialCategory, Vec<CatalogMaterial>>,
    labor_rates: HashMap<String, CatalogLaborRate>,
}

impl Catalog {
    /// Groups material and labor rate rows into a snapshot.
    ///
    /// A later labor rate with the same name replaces an earlier one.
    #[must_use]
    pub fn from_rows(materials: Vec<CatalogMaterial>, labor_rates: Vec<CatalogLaborRate>) -> Self {
        let mut grouped: BTreeMap<MaterialCategory, Vec<CatalogMaterial>> = BTreeMap::new();
        for material in materials {
            grouped.entry(material.category).or_default().push(material);
        }

        let labor_rates: HashMap<String, CatalogLaborRate> = labor_rates
            .into_iter()
            .map(|rate| (rate.name.clone(), rate))
            .collect();

        Self {
            materials: grouped,
            labor_rates,
        }
    }

    /// All materials in a category, in input order.
    #[must_use]
    pub fn materials(&self, category: MaterialCategory) -> &[CatalogMaterial] {
        self.materials.get(&category).map_or(&[], Vec::as_slice)
    }

    /// The first material in `category` named `name`.
    #[must_use]
    pub fn find_material(&self, category: MaterialCategory, name: &str) -> Option<&CatalogMaterial> {
        self.materials(category).iter().find(|m| m.name == name)
    }

    /// The labor rate named `name`.
    #[must_use]
    pub fn labor_rate(&self, name: &str) -> Option<&CatalogLaborRate> {
        self.labor_rates.get(name)
    }

    /// Total number of material rows in the snapshot.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.values().map(Vec::len).sum()
    }
}
