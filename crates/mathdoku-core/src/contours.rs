//! Connected-component bounding boxes over a binary mask.
//!
//! A stack-based flood fill over an implicit 4-connected pixel grid. The
//! traversal shape — a `visited` vec and an explicit stack instead of
//! recursion — is the same.

use crate::geometry::GridBBox;
use crate::image::GrayImage;

/// One 4-connected foreground component: its pixel count and bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Component {
    pub bbox: GridBBox,
    pub pixel_count: u32,
}

/// Label every 4-connected foreground (`!= 0`) component of a binary mask
/// and return each one's bounding box and pixel count.
pub fn connected_components(mask: &GrayImage) -> Vec<Component> {
    let w = mask.width;
    let h = mask.height;
    let mut visited = vec![false; w * h];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for start in 0..w * h {
        if visited[start] || mask.data[start] == 0 {
            continue;
        }
        stack.push(start);
        visited[start] = true;

        let mut min_x = (start % w) as u32;
        let mut max_x = min_x;
        let mut min_y = (start / w) as u32;
        let mut max_y = min_y;
        let mut count = 0u32;

        while let Some(idx) = stack.pop() {
            count += 1;
            let x = (idx % w) as u32;
            let y = (idx / w) as u32;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);

            let neighbors = [
                (x.checked_sub(1), Some(y)),
                (Some(x + 1), Some(y)),
                (Some(x), y.checked_sub(1)),
                (Some(x), Some(y + 1)),
            ];
            for (nx, ny) in neighbors {
                let (Some(nx), Some(ny)) = (nx, ny) else {
                    continue;
                };
                if nx >= w as u32 || ny >= h as u32 {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if visited[nidx] || mask.data[nidx] == 0 {
                    continue;
                }
                visited[nidx] = true;
                stack.push(nidx);
            }
        }

        components.push(Component {
            bbox: GridBBox::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1),
            pixel_count: count,
        });
    }

    components
}

/// The largest-area component passing the grid plausibility filter
/// (aspect >= 0.70, area >= 3% of the image), as used by both GridLocator
/// strategies.
pub fn largest_plausible_grid(mask: &GrayImage) -> Option<GridBBox> {
    connected_components(mask)
        .into_iter()
        .filter(|comp| comp.bbox.is_plausible_grid(mask.width as u32, mask.height as u32))
        .max_by_key(|comp| comp.bbox.area())
        .map(|comp| comp.bbox)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_two_disjoint_blocks() {
        let mut mask = GrayImage::new(10, 10);
        for y in 0..3 {
            for x in 0..3 {
                mask.set(x, y, 255);
            }
        }
        for y in 6..9 {
            for x in 6..9 {
                mask.set(x, y, 255);
            }
        }
        let comps = connected_components(&mask);
        assert_eq!(comps.len(), 2);
        assert!(comps.iter().all(|c| c.pixel_count == 9));
    }

    #[test]
    fn largest_plausible_grid_picks_the_square_block() {
        let mut mask = GrayImage::new(100, 100);
        // A thin sliver: fails the aspect check.
        for x in 0..90 {
            mask.set(x, 0, 255);
        }
        // A large square: passes both filters.
        for y in 10..90 {
            for x in 10..90 {
                mask.set(x, y, 255);
            }
        }
        let bbox = largest_plausible_grid(&mask).unwrap();
        assert_eq!(bbox.w, 80);
        assert_eq!(bbox.h, 80);
    }
}
