//! Game card presentation.

use tabled::Tabled;

use beagle_core::Card;

use crate::output;

use super::crud::Present;
use super::util;

#[derive(Tabled)]
pub struct CardRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Card> for CardRow {
    fn from(c: &Card) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            platform: c.platform_id.clone(),
            status: c.status.to_string(),
            tags: util::fmt_list(&c.tags),
        }
    }
}

impl Present for Card {
    type Row = CardRow;

    fn row(&self) -> CardRow {
        CardRow::from(self)
    }

    fn detail(&self) -> String {
        output::detail_lines(&[
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Platform", self.platform_id.clone()),
            ("Status", self.status.to_string()),
            ("Description", self.description.clone()),
            ("Cover", self.cover_image.clone()),
            ("Tags", util::fmt_list(&self.tags)),
            ("Created", util::fmt_time(self.created_at)),
            ("Updated", util::fmt_time(self.updated_at)),
        ])
    }
}
