//! # Page Builders
//!
//! One builder per page family: site index, manuscripts, spells,
//! categories, and the category tree index. Page content is produced as
//! strings first and written in `build_all`, so tests can assert on the
//! rendered HTML without touching the filesystem.

use crate::config::SiteConfig;
use crate::render::{breadcrumbs, href, layout};
use scriptorium_core::{
    Category, CategoryTree, Dataset, Manuscript, RecordIndex, ScriptoriumError, Spell,
    SubtreeCounts,
};
use std::collections::BTreeMap;
use std::path::Path;

/// Renders all pages of the site from the engine's read-only views.
#[derive(Debug, Clone, Copy)]
pub struct SiteBuilder<'a> {
    config: &'a SiteConfig,
    dataset: &'a Dataset,
    index: &'a RecordIndex,
    tree: &'a CategoryTree,
    counts: &'a SubtreeCounts,
}

impl<'a> SiteBuilder<'a> {
    /// Bundle the views a render pass needs. All structures must be
    /// fully built before this point; the builder never mutates them.
    #[must_use]
    pub fn new(
        config: &'a SiteConfig,
        dataset: &'a Dataset,
        index: &'a RecordIndex,
        tree: &'a CategoryTree,
        counts: &'a SubtreeCounts,
    ) -> Self {
        Self {
            config,
            dataset,
            index,
            tree,
            counts,
        }
    }

    /// Render and write the complete site.
    pub fn build_all(&self) -> Result<(), ScriptoriumError> {
        let out = &self.config.out_dir;
        for sub in ["manuscripts", "spells", "categories"] {
            std::fs::create_dir_all(out.join(sub))
                .map_err(|e| ScriptoriumError::Io(format!("cannot create {sub}/: {e}")))?;
        }

        write_page(&out.join("index.html"), &self.index_page())?;

        for ms in &self.dataset.manuscripts {
            write_page(
                &out.join("manuscripts").join(format!("{}.html", ms.id)),
                &self.manuscript_page(ms),
            )?;
        }
        for spell in &self.dataset.spells {
            write_page(
                &out.join("spells").join(format!("{}.html", spell.id)),
                &self.spell_page(spell),
            )?;
        }
        for category in &self.dataset.categories {
            write_page(
                &out.join("categories").join(format!("{}.html", category.id)),
                &self.category_page(category),
            )?;
        }

        write_page(
            &out.join("categories").join("index.html"),
            &self.categories_index_page(),
        )?;

        Ok(())
    }

    /// The site index: all manuscripts in display order.
    #[must_use]
    pub fn index_page(&self) -> String {
        let mut body = format!("<h1>{}</h1>\n<ul class=\"manuscripts\">\n", self.config.title);
        for ms in &self.dataset.manuscripts {
            let target = href(&self.config.base_path, &format!("/manuscripts/{}.html", ms.id));
            if ms.siglum.is_empty() {
                body.push_str(&format!("<li><a href=\"{target}\">{}</a></li>\n", ms.title));
            } else {
                body.push_str(&format!(
                    "<li><a href=\"{target}\">{}</a> ({})</li>\n",
                    ms.title, ms.siglum
                ));
            }
        }
        body.push_str("</ul>");
        layout(&self.config.base_path, &self.config.title, &body)
    }

    /// One manuscript page: metadata plus its spells in input order.
    #[must_use]
    pub fn manuscript_page(&self, ms: &Manuscript) -> String {
        let trail = breadcrumbs(
            &self.config.base_path,
            &[
                ("Home".to_string(), Some("/index.html".to_string())),
                (ms.title.clone(), None),
            ],
        );

        let mut body = format!("{trail}\n<h1>{}</h1>\n", ms.title);
        body.push_str(&details_list(&[
            ("Siglum", &ms.siglum),
            ("Location", &ms.location),
            ("Date", &ms.date),
            ("Format", &ms.format),
            ("Bibliography", &ms.bibliography),
        ]));

        let related = self.index.spells_in_manuscript(&ms.id);
        body.push_str("<h2>Spells</h2>\n");
        if related.is_empty() {
            body.push_str("<p>No spells recorded.</p>");
        } else {
            body.push_str("<ul>\n");
            for spell in related {
                let target = href(&self.config.base_path, &format!("/spells/{}.html", spell.id));
                let label = spell_title(spell);
                if spell.page.is_empty() {
                    body.push_str(&format!("<li><a href=\"{target}\">{label}</a></li>\n"));
                } else {
                    body.push_str(&format!(
                        "<li><a href=\"{target}\">{label}</a> (p. {})</li>\n",
                        spell.page
                    ));
                }
            }
            body.push_str("</ul>");
        }

        layout(&self.config.base_path, &ms.title, &body)
    }

    /// One spell page: breadcrumbs through its first category's ancestor
    /// chain, manuscript reference, text fields, category links.
    #[must_use]
    pub fn spell_page(&self, spell: &Spell) -> String {
        let mut trail_items = vec![
            ("Home".to_string(), Some("/index.html".to_string())),
            (
                "Categories".to_string(),
                Some("/categories/index.html".to_string()),
            ),
        ];
        let category_ids = self.index.categories_of_spell(&spell.id);
        if let Some(first) = category_ids.first() {
            for ancestor in self.tree.ancestors(first) {
                trail_items.push((
                    ancestor.name.clone(),
                    Some(format!("/categories/{}.html", ancestor.id)),
                ));
            }
        }
        trail_items.push((spell_title(spell), None));
        let trail = breadcrumbs(&self.config.base_path, &trail_items);

        let mut body = format!("{trail}\n<h1>{}</h1>\n", spell_title(spell));
        if !spell.title_syr.is_empty() {
            body.push_str(&format!("<p class=\"syriac\">{}</p>\n", spell.title_syr));
        }

        // A dangling manuscript reference renders as a placeholder, not a fault.
        match self.index.manuscript(&spell.manuscript_id) {
            Some(ms) => {
                let target = href(
                    &self.config.base_path,
                    &format!("/manuscripts/{}.html", ms.id),
                );
                body.push_str(&format!(
                    "<p><strong>Manuscript:</strong> <a href=\"{target}\">{}</a></p>\n",
                    ms.title
                ));
            }
            None => body.push_str("<p><strong>Manuscript:</strong> unknown</p>\n"),
        }

        body.push_str(&details_list(&[
            ("Page", &spell.page),
            ("Scribe", &spell.scribe),
        ]));
        if !spell.translation.is_empty() {
            body.push_str(&format!(
                "<h2>Translation</h2>\n<p>{}</p>\n",
                spell.translation
            ));
        }

        if !category_ids.is_empty() {
            body.push_str("<h2>Categories</h2>\n<ul>\n");
            for cid in category_ids {
                if let Some(category) = self.index.category(cid) {
                    let target = href(
                        &self.config.base_path,
                        &format!("/categories/{}.html", category.id),
                    );
                    body.push_str(&format!(
                        "<li><a href=\"{target}\">{}</a></li>\n",
                        category.name
                    ));
                }
            }
            body.push_str("</ul>");
        }

        layout(&self.config.base_path, &spell_title(spell), &body)
    }

    /// One category page: ancestor breadcrumbs, subtree count, parent
    /// link, child list, spells grouped by title.
    #[must_use]
    pub fn category_page(&self, category: &Category) -> String {
        let chain = self.tree.ancestors(&category.id);

        let mut trail_items = vec![
            ("Home".to_string(), Some("/index.html".to_string())),
            (
                "Categories".to_string(),
                Some("/categories/index.html".to_string()),
            ),
        ];
        if let Some((last, init)) = chain.split_last() {
            for ancestor in init {
                trail_items.push((
                    ancestor.name.clone(),
                    Some(format!("/categories/{}.html", ancestor.id)),
                ));
            }
            trail_items.push((last.name.clone(), None));
        } else {
            trail_items.push((category.name.clone(), None));
        }
        let trail = breadcrumbs(&self.config.base_path, &trail_items);

        let total = self.counts.total(&category.id);
        let mut body = format!("{trail}\n<h1>{} ({total})</h1>\n", category.name);

        if let Some(parent) = category.parent().and_then(|pid| self.tree.category(pid)) {
            let target = href(
                &self.config.base_path,
                &format!("/categories/{}.html", parent.id),
            );
            body.push_str(&format!(
                "<p><strong>Parent category:</strong> <a href=\"{target}\">{}</a></p>\n",
                parent.name
            ));
        }

        let children = self.tree.children(&category.id);
        body.push_str("<h2>Subcategories</h2>\n");
        if children.is_empty() {
            body.push_str("<p>No subcategories.</p>\n");
        } else {
            body.push_str("<ul>\n");
            for child in children {
                let target = href(
                    &self.config.base_path,
                    &format!("/categories/{}.html", child.id),
                );
                body.push_str(&format!(
                    "<li><a href=\"{target}\">{}</a></li>\n",
                    child.name
                ));
            }
            body.push_str("</ul>\n");
        }

        body.push_str("<h2>Spells</h2>\n");
        body.push_str(&self.category_spells_section(&category.id));

        layout(&self.config.base_path, &category.name, &body)
    }

    /// Spells of one category grouped by title (case-insensitive order),
    /// each occurrence cited as a (siglum, page) reference pair.
    fn category_spells_section(&self, category_id: &str) -> String {
        let related: Vec<&Spell> = self
            .index
            .spells_of_category(category_id)
            .iter()
            .filter_map(|sid| self.index.spell(sid))
            .collect();

        if related.is_empty() {
            return "<p>No spells in this category.</p>".to_string();
        }

        // Group by display title; key on (lowercase, original) so the
        // group order is case-insensitive with a deterministic tiebreak.
        let mut groups: BTreeMap<(String, String), Vec<&Spell>> = BTreeMap::new();
        for spell in related {
            let title = spell_title(spell);
            groups
                .entry((title.to_lowercase(), title))
                .or_default()
                .push(spell);
        }

        let mut section = String::from("<ul>\n");
        for ((_, title), spells) in &groups {
            let refs: Vec<String> = spells
                .iter()
                .map(|spell| {
                    let siglum = self
                        .index
                        .manuscript(&spell.manuscript_id)
                        .map(|ms| ms.siglum.clone())
                        .unwrap_or_default();
                    format!(
                        "<a href=\"{}\">{siglum}</a> <a href=\"{}\">{}</a>",
                        href(
                            &self.config.base_path,
                            &format!("/manuscripts/{}.html", spell.manuscript_id)
                        ),
                        href(&self.config.base_path, &format!("/spells/{}.html", spell.id)),
                        spell.page
                    )
                })
                .collect();
            section.push_str(&format!(
                "<li><strong>{title}</strong><br>({})</li>\n",
                refs.join("; ")
            ));
        }
        section.push_str("</ul>");
        section
    }

    /// The category tree index: roots with totals, one level of children.
    #[must_use]
    pub fn categories_index_page(&self) -> String {
        let mut body = String::from("<h1>Categories</h1>\n");

        for root in self.tree.roots() {
            let target = href(
                &self.config.base_path,
                &format!("/categories/{}.html", root.id),
            );
            body.push_str(&format!(
                "<h2><a href=\"{target}\">{} ({})</a></h2>\n",
                root.name,
                self.counts.total(&root.id)
            ));

            let children = self.tree.children(&root.id);
            if !children.is_empty() {
                body.push_str("<ul>\n");
                for child in children {
                    let child_target = href(
                        &self.config.base_path,
                        &format!("/categories/{}.html", child.id),
                    );
                    body.push_str(&format!(
                        "<li><a href=\"{child_target}\">{} ({})</a></li>\n",
                        child.name,
                        self.counts.total(&child.id)
                    ));
                }
                body.push_str("</ul>\n");
            }
        }

        layout(&self.config.base_path, "Categories", &body)
    }
}

/// Display title of a spell; untitled entries get a placeholder.
fn spell_title(spell: &Spell) -> String {
    if spell.title_en.is_empty() {
        "Untitled".to_string()
    } else {
        spell.title_en.clone()
    }
}

/// Definition list of labelled fields, skipping empty values.
fn details_list(fields: &[(&str, &str)]) -> String {
    let rows: Vec<String> = fields
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("<dt>{label}</dt><dd>{value}</dd>"))
        .collect();
    if rows.is_empty() {
        String::new()
    } else {
        format!("<dl>\n{}\n</dl>\n", rows.join("\n"))
    }
}

/// Write one rendered page to disk.
fn write_page(path: &Path, html: &str) -> Result<(), ScriptoriumError> {
    std::fs::write(path, html)
        .map_err(|e| ScriptoriumError::Io(format!("cannot write {}: {e}", path.display())))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scriptorium_core::CategoryLink;

    fn fixture() -> (SiteConfig, Dataset) {
        let config = SiteConfig::default();
        let dataset = Dataset {
            manuscripts: vec![Manuscript {
                id: "m1".to_string(),
                title: "Codex A".to_string(),
                siglum: "CA".to_string(),
                ..Manuscript::default()
            }],
            spells: vec![
                Spell {
                    id: "s1".to_string(),
                    manuscript_id: "m1".to_string(),
                    title_en: "Binding of fever".to_string(),
                    page: "12r".to_string(),
                    ..Spell::default()
                },
                Spell {
                    id: "s2".to_string(),
                    manuscript_id: "ghost".to_string(),
                    ..Spell::default()
                },
            ],
            categories: vec![
                Category {
                    id: "c1".to_string(),
                    name: "Healing".to_string(),
                    parent_id: None,
                },
                Category {
                    id: "c2".to_string(),
                    name: "Fevers".to_string(),
                    parent_id: Some("c1".to_string()),
                },
            ],
            links: vec![CategoryLink {
                spell_id: "s1".to_string(),
                category_id: "c2".to_string(),
            }],
        };
        (config, dataset)
    }

    fn with_builder<T>(run: impl FnOnce(SiteBuilder<'_>) -> T) -> T {
        let (config, dataset) = fixture();
        let index = RecordIndex::build(&dataset);
        let tree = CategoryTree::build(&dataset.categories);
        let counts = SubtreeCounts::compute(&tree, &index);
        run(SiteBuilder::new(&config, &dataset, &index, &tree, &counts))
    }

    #[test]
    fn index_page_lists_manuscripts() {
        let page = with_builder(|b| b.index_page());
        assert!(page.contains("<a href=\"/manuscripts/m1.html\">Codex A</a> (CA)"));
    }

    #[test]
    fn spell_breadcrumbs_walk_ancestor_chain() {
        let page = with_builder(|b| {
            let spell = b.dataset.spells[0].clone();
            b.spell_page(&spell)
        });
        // Root-first: Healing before Fevers, spell title last and unlinked.
        let healing = page.find("/categories/c1.html").unwrap_or(usize::MAX);
        let fevers = page.find("/categories/c2.html").unwrap_or(usize::MAX);
        assert!(healing < fevers);
        // The spell's own crumb is plain text, closing the trail.
        assert!(page.contains("Binding of fever</nav>"));
    }

    #[test]
    fn spell_with_unknown_manuscript_renders_placeholder() {
        let page = with_builder(|b| {
            let spell = b.dataset.spells[1].clone();
            b.spell_page(&spell)
        });
        assert!(page.contains("<strong>Manuscript:</strong> unknown"));
        assert!(page.contains("<h1>Untitled</h1>"));
    }

    #[test]
    fn category_page_carries_total_count() {
        let page = with_builder(|b| {
            let category = b.dataset.categories[0].clone();
            b.category_page(&category)
        });
        // One spell under the child subtree rolls up to the root.
        assert!(page.contains("<h1>Healing (1)</h1>"));
        assert!(page.contains("No spells in this category."));
        assert!(page.contains("<a href=\"/categories/c2.html\">Fevers</a>"));
    }

    #[test]
    fn category_page_groups_spells_with_references() {
        let page = with_builder(|b| {
            let category = b.dataset.categories[1].clone();
            b.category_page(&category)
        });
        assert!(page.contains("<strong>Binding of fever</strong>"));
        assert!(page.contains("<a href=\"/manuscripts/m1.html\">CA</a>"));
        assert!(page.contains("<a href=\"/spells/s1.html\">12r</a>"));
        assert!(page.contains("<strong>Parent category:</strong>"));
    }

    #[test]
    fn categories_index_shows_roots_and_children_with_totals() {
        let page = with_builder(|b| b.categories_index_page());
        assert!(page.contains("Healing (1)"));
        assert!(page.contains("Fevers (1)"));
    }
}
