use super::{card_image, Card, RenderContext};
use crate::dom::Element;
use crate::models::Project;

impl Card for Project {
    fn card(&self, ctx: &RenderContext) -> Element {
        let tags = self.tags();
        let tag_block = (!tags.is_empty()).then(|| {
            Element::new("div")
                .class("tech-tags")
                .children(
                    tags.iter()
                        .map(|t| Element::new("span").class("tech-tag").text(t.as_str())),
                )
        });

        Element::new("div")
            .class("project-card")
            .child(card_image(&self.image, &self.title, ctx))
            .child(
                Element::new("div")
                    .class("project-info")
                    .child(Element::new("h3").text(self.title.as_str()))
                    .child(Element::new("p").text(self.description.as_str()))
                    .child_opt(tag_block)
                    .child(
                        Element::new("a")
                            .class("btn-outline")
                            .attr("href", self.page_href())
                            .text("View Project"),
                    ),
            )
    }
}
