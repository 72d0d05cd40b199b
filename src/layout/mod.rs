//! Layout Module - Page geometry via Taffy
//!
//! The page is one column of fixed-height blocks: the header, each
//! section in order, then the footer. Taffy computes the column layout
//! and this module
//! extracts per-element row geometry from it. That geometry seeds the
//! viewport module (which elements are visible) and the smooth-scroll
//! targets (where a nav link lands).
//!
//! Images are not layout nodes; each lives at a fixed row offset inside
//! its section, so their rectangles are derived from the section's.

use std::collections::HashMap;

use taffy::{AvailableSpace, Dimension, Display, FlexDirection, Size, Style, TaffyTree};

use crate::error::PageError;
use crate::types::{Element, SectionId};

// =============================================================================
// SPECS
// =============================================================================

/// A lazily loaded image inside a section.
#[derive(Debug, Clone)]
pub struct ImageSpec {
    /// Placeholder source shown until the image becomes visible.
    pub placeholder: String,
    /// Full-resolution source.
    pub src: String,
    /// Row offset from the top of the owning section.
    pub offset: u16,
    /// Height in rows.
    pub height: u16,
}

/// A content section of the page.
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub id: SectionId,
    /// Height in rows.
    pub height: u16,
    pub images: Vec<ImageSpec>,
}

impl SectionSpec {
    pub fn new(id: SectionId, height: u16) -> Self {
        Self { id, height, images: Vec::new() }
    }

    pub fn with_images(id: SectionId, height: u16, images: Vec<ImageSpec>) -> Self {
        Self { id, height, images }
    }
}

// =============================================================================
// COMPUTED GEOMETRY
// =============================================================================

/// Row geometry of one page block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGeometry {
    pub y: u16,
    pub height: u16,
}

/// Computed geometry for the whole page.
#[derive(Debug, Clone)]
pub struct PageLayout {
    blocks: HashMap<Element, BlockGeometry>,
    /// Total page height in rows.
    pub content_height: u16,
}

impl PageLayout {
    /// Geometry of a block, if the page has it.
    pub fn block(&self, element: Element) -> Option<BlockGeometry> {
        self.blocks.get(&element).copied()
    }

    /// Iterate all blocks.
    pub fn blocks(&self) -> impl Iterator<Item = (Element, BlockGeometry)> + '_ {
        self.blocks.iter().map(|(e, g)| (*e, *g))
    }
}

// =============================================================================
// LAYOUT COMPUTATION
// =============================================================================

fn block_style(height: u16) -> Style {
    Style {
        size: Size {
            width: Dimension::Percent(1.0),
            height: Dimension::Length(height as f32),
        },
        ..Default::default()
    }
}

/// Lay the page out as a column and extract block geometry.
///
/// Taffy calls are unwrapped: the tree is built here from scratch, so the
/// node ids are valid by construction.
pub fn compute_page_layout(
    header_height: u16,
    sections: &[SectionSpec],
    footer_height: u16,
    width: u16,
) -> Result<PageLayout, PageError> {
    if sections.is_empty() {
        return Err(PageError::EmptyPage);
    }

    let mut tree: TaffyTree<()> = TaffyTree::new();

    let header = tree.new_leaf(block_style(header_height)).unwrap();
    let mut children = vec![header];
    for section in sections {
        children.push(tree.new_leaf(block_style(section.height)).unwrap());
    }
    let footer = tree.new_leaf(block_style(footer_height)).unwrap();
    children.push(footer);

    let root = tree
        .new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                size: Size {
                    width: Dimension::Length(width as f32),
                    height: Dimension::Auto,
                },
                ..Default::default()
            },
            &children,
        )
        .unwrap();

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(width as f32),
            height: AvailableSpace::MaxContent,
        },
    )
    .unwrap();

    let mut blocks = HashMap::new();

    let header_layout = tree.layout(header).unwrap();
    blocks.insert(
        Element::Header,
        BlockGeometry {
            y: header_layout.location.y as u16,
            height: header_layout.size.height as u16,
        },
    );

    let mut image_index = 0usize;
    for (spec, node) in sections.iter().zip(children.iter().skip(1)) {
        let layout = tree.layout(*node).unwrap();
        let y = layout.location.y as u16;
        blocks.insert(
            Element::Section(spec.id),
            BlockGeometry { y, height: layout.size.height as u16 },
        );

        for image in &spec.images {
            blocks.insert(
                Element::Image(image_index),
                BlockGeometry { y: y + image.offset, height: image.height },
            );
            image_index += 1;
        }
    }

    let footer_layout = tree.layout(footer).unwrap();
    blocks.insert(
        Element::Footer,
        BlockGeometry {
            y: footer_layout.location.y as u16,
            height: footer_layout.size.height as u16,
        },
    );

    let content_height = tree.layout(root).unwrap().size.height as u16;

    Ok(PageLayout { blocks, content_height })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_rejected() {
        assert_eq!(
            compute_page_layout(30, &[], 12, 80).unwrap_err(),
            PageError::EmptyPage
        );
    }

    #[test]
    fn test_sections_stack_below_header() {
        let sections = vec![
            SectionSpec::new(SectionId(1), 40),
            SectionSpec::new(SectionId(2), 50),
            SectionSpec::new(SectionId(3), 40),
        ];
        let layout = compute_page_layout(30, &sections, 12, 80).unwrap();

        assert_eq!(
            layout.block(Element::Header),
            Some(BlockGeometry { y: 0, height: 30 })
        );
        assert_eq!(
            layout.block(Element::Section(SectionId(1))),
            Some(BlockGeometry { y: 30, height: 40 })
        );
        assert_eq!(
            layout.block(Element::Section(SectionId(2))),
            Some(BlockGeometry { y: 70, height: 50 })
        );
        assert_eq!(
            layout.block(Element::Section(SectionId(3))),
            Some(BlockGeometry { y: 120, height: 40 })
        );
        assert_eq!(
            layout.block(Element::Footer),
            Some(BlockGeometry { y: 160, height: 12 })
        );
        assert_eq!(layout.content_height, 172);
    }

    #[test]
    fn test_image_rects_derived_from_section() {
        let sections = vec![SectionSpec::with_images(
            SectionId(1),
            40,
            vec![
                ImageSpec {
                    placeholder: "p0.jpg".into(),
                    src: "f0.jpg".into(),
                    offset: 5,
                    height: 10,
                },
                ImageSpec {
                    placeholder: "p1.jpg".into(),
                    src: "f1.jpg".into(),
                    offset: 20,
                    height: 8,
                },
            ],
        )];
        let layout = compute_page_layout(10, &sections, 0, 80).unwrap();

        assert_eq!(
            layout.block(Element::Image(0)),
            Some(BlockGeometry { y: 15, height: 10 })
        );
        assert_eq!(
            layout.block(Element::Image(1)),
            Some(BlockGeometry { y: 30, height: 8 })
        );
    }

    #[test]
    fn test_unknown_block_is_none() {
        let sections = vec![SectionSpec::new(SectionId(1), 40)];
        let layout = compute_page_layout(30, &sections, 0, 80).unwrap();

        assert_eq!(layout.block(Element::Section(SectionId(9))), None);
        assert_eq!(layout.block(Element::Image(0)), None);
    }
}
