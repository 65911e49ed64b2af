//! Default catalog of devotion groups and the saints list.
//!
//! The weekday table encoded here ({Mon, Sat} -> Joyful, {Tue, Fri} ->
//! Sorrowful, {Wed, Sun} -> Glorious, {Thu} -> Luminous) is a fixed business
//! rule carried as data, not a liturgical calendar computation. The stations
//! walk applies on every weekday but is declared last, so the first-match
//! scan only reaches it through an explicit user override.

use crate::types::*;
use chrono::Weekday;
use once_cell::sync::Lazy;

/// Default inner repetition target for the counted mystery sets.
pub const DEFAULT_REPEAT_TARGET: u32 = 10;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(|| build_catalog(DEFAULT_REPEAT_TARGET));

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the built-in groups and saints list
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference. This function is retained for testing and for building
/// against a configured repetition target.
pub fn build_default_catalog() -> Catalog {
    build_catalog(DEFAULT_REPEAT_TARGET)
}

fn item(title: &str, meditation: &str, media_ref: Option<&str>) -> DevotionItem {
    DevotionItem {
        title: title.into(),
        meditation: meditation.into(),
        media_ref: media_ref.map(Into::into),
    }
}

fn saint(name: &str, feast: &str, biography: &str) -> Saint {
    Saint {
        name: name.into(),
        feast: feast.into(),
        biography: biography.into(),
    }
}

/// Build the catalog with a specific repetition target for the counted
/// mystery sets (driven by `[devotion] repeat_target` in the config file).
pub fn build_catalog(repeat_target: u32) -> Catalog {
    let counted = RepeatRule::Counted {
        target: repeat_target,
    };

    let groups = vec![
        DevotionGroup {
            id: "joyful".into(),
            name: "Joyful Mysteries".into(),
            weekdays: vec![Weekday::Mon, Weekday::Sat],
            repeat: counted.clone(),
            items: vec![
                item(
                    "The Annunciation",
                    "The angel Gabriel announces to Mary that she is to be the mother of the Lord.",
                    Some("media/joyful/annunciation.jpg"),
                ),
                item(
                    "The Visitation",
                    "Mary visits her cousin Elizabeth, who greets her as blessed among women.",
                    Some("media/joyful/visitation.jpg"),
                ),
                item(
                    "The Nativity",
                    "Jesus is born in a stable in Bethlehem.",
                    Some("media/joyful/nativity.jpg"),
                ),
                item(
                    "The Presentation",
                    "Mary and Joseph present the infant Jesus in the Temple.",
                    Some("media/joyful/presentation.jpg"),
                ),
                item(
                    "The Finding in the Temple",
                    "After three days of searching, Mary and Joseph find the young Jesus teaching in the Temple.",
                    Some("media/joyful/finding.jpg"),
                ),
            ],
        },
        DevotionGroup {
            id: "sorrowful".into(),
            name: "Sorrowful Mysteries".into(),
            weekdays: vec![Weekday::Tue, Weekday::Fri],
            repeat: counted.clone(),
            items: vec![
                item(
                    "The Agony in the Garden",
                    "Jesus prays in Gethsemane while his disciples sleep.",
                    Some("media/sorrowful/agony.jpg"),
                ),
                item(
                    "The Scourging at the Pillar",
                    "Jesus is bound and scourged at Pilate's order.",
                    Some("media/sorrowful/scourging.jpg"),
                ),
                item(
                    "The Crowning with Thorns",
                    "Soldiers weave a crown of thorns and place it on his head.",
                    Some("media/sorrowful/crowning.jpg"),
                ),
                item(
                    "The Carrying of the Cross",
                    "Jesus carries his cross to Golgotha.",
                    Some("media/sorrowful/carrying.jpg"),
                ),
                item(
                    "The Crucifixion",
                    "Jesus dies on the cross between two thieves.",
                    Some("media/sorrowful/crucifixion.jpg"),
                ),
            ],
        },
        DevotionGroup {
            id: "glorious".into(),
            name: "Glorious Mysteries".into(),
            weekdays: vec![Weekday::Wed, Weekday::Sun],
            repeat: counted.clone(),
            items: vec![
                item(
                    "The Resurrection",
                    "On the third day Jesus rises from the dead.",
                    Some("media/glorious/resurrection.jpg"),
                ),
                item(
                    "The Ascension",
                    "Jesus ascends into heaven before his disciples.",
                    Some("media/glorious/ascension.jpg"),
                ),
                item(
                    "The Descent of the Holy Spirit",
                    "The Holy Spirit descends upon Mary and the apostles at Pentecost.",
                    Some("media/glorious/pentecost.jpg"),
                ),
                item(
                    "The Assumption",
                    "Mary is assumed body and soul into heaven.",
                    Some("media/glorious/assumption.jpg"),
                ),
                item(
                    "The Coronation of Mary",
                    "Mary is crowned queen of heaven and earth.",
                    Some("media/glorious/coronation.jpg"),
                ),
            ],
        },
        DevotionGroup {
            id: "luminous".into(),
            name: "Luminous Mysteries".into(),
            weekdays: vec![Weekday::Thu],
            repeat: counted,
            items: vec![
                item(
                    "The Baptism in the Jordan",
                    "Jesus is baptized by John, and the Spirit descends upon him.",
                    Some("media/luminous/baptism.jpg"),
                ),
                item(
                    "The Wedding at Cana",
                    "At Mary's request, Jesus changes water into wine.",
                    Some("media/luminous/cana.jpg"),
                ),
                item(
                    "The Proclamation of the Kingdom",
                    "Jesus proclaims the kingdom of God and calls all to conversion.",
                    Some("media/luminous/kingdom.jpg"),
                ),
                item(
                    "The Transfiguration",
                    "Jesus is transfigured on the mountain before Peter, James and John.",
                    Some("media/luminous/transfiguration.jpg"),
                ),
                item(
                    "The Institution of the Eucharist",
                    "At the Last Supper, Jesus gives his body and blood.",
                    Some("media/luminous/eucharist.jpg"),
                ),
            ],
        },
        DevotionGroup {
            id: "stations".into(),
            name: "Stations of the Cross".into(),
            weekdays: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            repeat: RepeatRule::SinglePass,
            items: vec![
                item("Jesus is condemned to death", "Pilate washes his hands and hands Jesus over.", None),
                item("Jesus takes up his cross", "Jesus accepts the weight of the cross.", None),
                item("Jesus falls the first time", "The burden brings Jesus to the ground.", None),
                item("Jesus meets his mother", "Mary meets her son on the way to Calvary.", None),
                item("Simon helps carry the cross", "Simon of Cyrene is pressed into service.", None),
                item("Veronica wipes the face of Jesus", "Veronica offers her veil.", None),
                item("Jesus falls the second time", "Jesus falls again under the cross.", None),
                item("Jesus meets the women of Jerusalem", "Jesus consoles the weeping women.", None),
                item("Jesus falls the third time", "A third fall, near the summit.", None),
                item("Jesus is stripped of his garments", "The soldiers divide his clothing.", None),
                item("Jesus is nailed to the cross", "Jesus is crucified between two thieves.", None),
                item("Jesus dies on the cross", "Jesus commends his spirit and dies.", None),
                item("Jesus is taken down from the cross", "His body is placed in his mother's arms.", None),
                item("Jesus is laid in the tomb", "The body of Jesus is laid in a new tomb.", None),
            ],
        },
    ];

    let saints = vec![
        saint(
            "St. Thérèse of Lisieux",
            "October 1",
            "Carmelite nun of the Little Way, who sought holiness in small daily acts of love.",
        ),
        saint(
            "St. Francis of Assisi",
            "October 4",
            "Founder of the Franciscans, renouncing wealth to live among the poor.",
        ),
        saint(
            "St. Augustine of Hippo",
            "August 28",
            "Bishop and doctor of the Church, author of the Confessions.",
        ),
        saint(
            "St. Teresa of Ávila",
            "October 15",
            "Carmelite reformer and mystic, doctor of the Church.",
        ),
        saint(
            "St. John Vianney",
            "August 4",
            "The Curé of Ars, patron of parish priests.",
        ),
        saint(
            "St. Catherine of Siena",
            "April 29",
            "Dominican tertiary and doctor of the Church, counselor to popes.",
        ),
        saint(
            "St. Ignatius of Loyola",
            "July 31",
            "Founder of the Jesuits and author of the Spiritual Exercises.",
        ),
        saint(
            "St. Thomas Aquinas",
            "January 28",
            "Dominican friar and theologian, author of the Summa Theologiae.",
        ),
        saint(
            "St. Maximilian Kolbe",
            "August 14",
            "Franciscan friar who gave his life for a fellow prisoner at Auschwitz.",
        ),
        saint(
            "St. Monica",
            "August 27",
            "Mother of Augustine, who prayed for his conversion for many years.",
        ),
        saint(
            "St. Joan of Arc",
            "May 30",
            "Peasant girl who led the armies of France and died at the stake at nineteen.",
        ),
        saint(
            "St. Benedict of Nursia",
            "July 11",
            "Father of western monasticism and author of the Rule.",
        ),
    ];

    Catalog { groups, saints }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.groups.is_empty() {
            errors.push("Catalog has no devotion groups".to_string());
        }

        let mut seen_ids = std::collections::HashSet::new();
        for group in &self.groups {
            if group.id.is_empty() {
                errors.push("Group has empty ID".to_string());
            }
            if !seen_ids.insert(group.id.as_str()) {
                errors.push(format!("Duplicate group ID '{}'", group.id));
            }
            if group.name.is_empty() {
                errors.push(format!("Group '{}' has empty name", group.id));
            }
            if group.items.is_empty() {
                errors.push(format!("Group '{}' has no items", group.id));
            }
            if let RepeatRule::Counted { target } = group.repeat {
                if target == 0 {
                    errors.push(format!("Group '{}' has a zero repetition target", group.id));
                }
            }
            for item in &group.items {
                if item.title.is_empty() {
                    errors.push(format!("Group '{}' has an item with empty title", group.id));
                }
            }
        }

        // Every weekday should be covered by at least one group, otherwise
        // the daily selection falls through to the first-group fallback.
        let all_days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for day in all_days {
            if !self.groups.iter().any(|g| g.applies_on(day)) {
                errors.push(format!("No group applies on {:?}", day));
            }
        }

        if self.saints.is_empty() {
            errors.push("Catalog has no saints".to_string());
        }
        for saint in &self.saints {
            if saint.name.is_empty() {
                errors.push("Saint has empty name".to_string());
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.groups.len(), 5);
        assert_eq!(catalog.saints.len(), 12);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_mystery_sets_are_counted() {
        let catalog = build_default_catalog();
        for id in ["joyful", "sorrowful", "glorious", "luminous"] {
            let group = catalog.group(id).unwrap();
            assert_eq!(group.repeat, RepeatRule::Counted { target: 10 });
            assert_eq!(group.items.len(), 5, "{id} should have five mysteries");
        }
    }

    #[test]
    fn test_stations_walk_shape() {
        let catalog = build_default_catalog();
        let stations = catalog.group("stations").unwrap();
        assert_eq!(stations.repeat, RepeatRule::SinglePass);
        assert_eq!(stations.items.len(), 14);
        assert_eq!(stations.weekdays.len(), 7);
    }

    #[test]
    fn test_configured_target_applies_to_counted_groups() {
        let catalog = build_catalog(3);
        let joyful = catalog.group("joyful").unwrap();
        assert_eq!(joyful.repeat, RepeatRule::Counted { target: 3 });
        // Single-pass groups are unaffected.
        let stations = catalog.group("stations").unwrap();
        assert_eq!(stations.repeat, RepeatRule::SinglePass);
    }

    #[test]
    fn test_every_weekday_is_covered_by_a_mystery_set() {
        let catalog = build_default_catalog();
        let mystery_ids = ["joyful", "sorrowful", "glorious", "luminous"];
        let all_days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for day in all_days {
            assert!(
                catalog
                    .groups
                    .iter()
                    .filter(|g| mystery_ids.contains(&g.id.as_str()))
                    .any(|g| g.applies_on(day)),
                "no mystery set covers {:?}",
                day
            );
        }
    }
}
