//! The horizontal pieces a beam is drawn with.
//!
//! Every beam rank present on a side of a stem gives a stem segment ; runs of neighbouring stem segments of one rank
//! become a [`BeamSegment`]. Runs end at a stem (touching it) or stick out of it as a beamlet.

use std::collections::BTreeMap;

use crate::geometry::{Axis, Direction, Drul};
use crate::grob::{GrobId, Grobs, Object, Property};
use crate::interval::Interval;
use crate::layout::constants::{BEAMLET_DEFAULT_LENGTH, BEAMLET_MAX_LENGTH_PROPORTION};
use crate::layout::staff;
use super::stem;

/// One horizontal piece of the beam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamSegment {
    /// beam rank, multiplied by the beam translation to get the vertical offset
    pub vertical_count : i32,
    /// span in the frame of the common X reference point
    pub horizontal     : Interval,
}

/// A beam rank on one side of one stem
#[derive(Debug, Clone, Copy)]
struct StemSegment {
    stem_index : usize,
    stem_x     : f64,
    /// stem width
    width      : f64,
    /// side of the stem the beam leaves to
    dir        : Direction,
    /// order along the beam: two slots per stem, left then right
    rank       : usize,
    /// tremolo beam that does not touch the stem
    gapped     : bool,
}

fn beamlet_setting(grobs : &Grobs, stem : GrobId, property : Property, default : f64, dir : Direction) -> f64 {
    grobs.interval(stem, property).map_or(default, |iv| iv.at(dir))
}

/// Segments of the beam, sorted by rank then from left to right
pub fn get_beam_segments(grobs : &mut Grobs, me : GrobId, common_x : GrobId) -> Vec<BeamSegment> {
    let stems = super::stems(grobs, me).to_vec();
    let gap_count = grobs.integer(me, Property::GapCount).unwrap_or(0) as i32;
    let gap_length = grobs.robust_number(me, Property::Gap, 0.);

    let mut by_rank : BTreeMap<i32, Vec<StemSegment>> = BTreeMap::new();
    let mut stem_xs = Vec::with_capacity(stems.len());
    for (i, &s) in stems.iter().enumerate() {
        let stem_x = grobs.relative_coordinate(s, common_x, Axis::X);
        stem_xs.push(stem_x);
        let beaming = match grobs.beaming(s) {
            Some(beaming) => beaming.clone(),
            None => continue,
        };
        let width = grobs.robust_number(s, Property::Thickness, 1.) * staff::line_thickness(grobs, s);
        let sd = stem::direction(grobs, s).sign() as i32;
        let (lo, hi) = stem::beam_multiplicity(grobs, s).unwrap_or((0, 0));
        let inner = if sd > 0 { lo } else { hi };

        let sides = Drul::new(&beaming.left, &beaming.right);
        for &d in Direction::BOTH.iter() {
            for &r in sides[d].iter() {
                by_rank.entry(r).or_default().push(StemSegment {
                    stem_index : i,
                    stem_x,
                    width,
                    dir    : d,
                    rank   : 2 * i + usize::from(d == Direction::Up),
                    gapped : sd * r < sd * inner + gap_count,
                });
            }
        }
    }

    let mut segments = Vec::new();
    for (vertical_count, mut segs) in by_rank {
        segs.sort_by_key(|seg| seg.rank);
        let mut current = Interval::EMPTY;
        for (j, seg) in segs.iter().enumerate() {
            for &event_dir in Direction::BOTH.iter() {
                let on_beam_bound = match event_dir {
                    Direction::Down => j == 0 || seg.rank - segs[j - 1].rank > 1,
                    _ => j + 1 == segs.len() || segs[j + 1].rank - seg.rank > 1,
                };
                if !on_beam_bound {
                    continue;
                }

                let e = event_dir.sign();
                let mut edge = seg.stem_x;
                if seg.dir == event_dir {
                    // beamlet, or the free end of a run
                    let s = stems[seg.stem_index];
                    let mut length = beamlet_setting(grobs, s, Property::BeamletDefaultLength, BEAMLET_DEFAULT_LENGTH, seg.dir);
                    let neighbour = match event_dir {
                        Direction::Down => seg.stem_index.checked_sub(1),
                        _ => Some(seg.stem_index + 1).filter(|&n| n < stems.len()),
                    };
                    if let Some(n) = neighbour {
                        let proportion = beamlet_setting(
                            grobs, s, Property::BeamletMaxLengthProportion, BEAMLET_MAX_LENGTH_PROPORTION, seg.dir,
                        );
                        length = length.min((stem_xs[n] - seg.stem_x).abs() * proportion);
                    }
                    edge += e * length;
                }
                else {
                    edge += e * seg.width / 2.;
                    if seg.gapped {
                        edge -= e * gap_length;
                        let s = stems[seg.stem_index];
                        if stem::is_invisible(grobs, s) {
                            // whole notes: keep clear of the note heads
                            let heads = grobs.objects(s, Object::NoteHeads).to_vec();
                            let mut extent = Interval::EMPTY;
                            for h in heads {
                                extent.unite(grobs.extent(h, common_x, Axis::X));
                            }
                            if !extent.is_empty() {
                                edge = extent.at(-event_dir) - e * gap_length;
                            }
                        }
                    }
                }
                current.set(event_dir, edge);

                if event_dir == Direction::Up {
                    segments.push(BeamSegment { vertical_count, horizontal : current });
                    current = Interval::EMPTY;
                }
            }
        }
    }
    segments
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::grob::Beaming;
    use crate::layout::LayoutSettings;

    fn approx(a : f64, b : f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn beam(grobs : &mut Grobs, stems : &[(f64, Beaming)]) -> (GrobId, GrobId) {
        let staff = grobs.add_grob("Staff");
        let beam = grobs.add_grob("Beam");
        grobs.set_parent(beam, staff, Axis::X);
        for (x, beaming) in stems {
            let s = grobs.add_grob("Stem");
            grobs.set_parent(s, staff, Axis::X);
            grobs.set_offset(s, Axis::X, *x);
            grobs.set_property(s, Property::HeadPositions, Interval::new(0., 0.)).unwrap();
            grobs.set_property(s, Property::Direction, Direction::Down).unwrap();
            grobs.set_property(s, Property::Beaming, beaming.clone()).unwrap();
            grobs.add_object(beam, Object::Stems, s);
        }
        (beam, staff)
    }

    fn beaming(left : &[i32], right : &[i32]) -> Beaming {
        Beaming { left : left.to_vec(), right : right.to_vec() }
    }

    #[test]
    fn runs_and_beamlets() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let (b, staff) = beam(&mut grobs, &[
            (0., beaming(&[], &[0])),
            (4., beaming(&[0], &[0])),
            (8., beaming(&[0, 1], &[])),
        ]);
        let segments = get_beam_segments(&mut grobs, b, staff);
        eprintln!("{:?}", segments);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].vertical_count, 0);
        assert!(approx(segments[0].horizontal.left, -0.05));
        assert!(approx(segments[0].horizontal.right, 8.05));
        assert_eq!(segments[1].vertical_count, 1);
        assert!(approx(segments[1].horizontal.left, 6.9));
        assert!(approx(segments[1].horizontal.right, 8.05));
    }

    #[test]
    fn broken_ranks() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let (b, staff) = beam(&mut grobs, &[
            (0., beaming(&[], &[0, 1])),
            (1., beaming(&[0], &[0])),
            (4., beaming(&[0, 1], &[])),
        ]);
        let segments : Vec<_> = get_beam_segments(&mut grobs, b, staff)
            .into_iter()
            .filter(|seg| seg.vertical_count == 1)
            .collect();
        assert_eq!(segments.len(), 2);
        // limited by the close neighbour
        assert!(approx(segments[0].horizontal.left, -0.05));
        assert!(approx(segments[0].horizontal.right, 0.75));
        assert!(approx(segments[1].horizontal.left, 2.9));
        assert!(approx(segments[1].horizontal.right, 4.05));
    }

    #[test]
    fn beamlet_length_property() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let (b, staff) = beam(&mut grobs, &[
            (0., beaming(&[], &[0, 1])),
            (10., beaming(&[0], &[])),
        ]);
        let first = super::super::stems(&grobs, b)[0];
        grobs.set_property(first, Property::BeamletDefaultLength, Interval::new(2., 2.)).unwrap();
        let segments = get_beam_segments(&mut grobs, b, staff);
        assert_eq!(segments.len(), 2);
        assert!(approx(segments[1].horizontal.right, 2.));
    }
}
