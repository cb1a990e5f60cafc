use mosaic_io::{displacements, moments, parse_elements};
use mosaic_model::{DisplacementField, MomentField};
use mosaic_scene::{LEGEND_BINS, build_displacement_scene, build_moment_scene};

const GEOMETRY: &str = "\
Element;Type;NodesCount;a;b;c;d;Node1;X1;Y1;Z1;Node2;X2;Y2;Z2;Node3;X3;Y3;Z3;Node4;X4;Y4;Z4
1;44;4;;;;;1;0;0;0;2;1;0;0;5;1;1;0;4;0;1;0
2;44;4;;;;;2;1;0;0;3;2;0;0;6;2;1;0;5;1;1;0
3;44;4;;;;;3;2;0;0;7;3;0;0;8;3;1;0;6;2;1;0
";

#[test]
fn moment_mosaic_covers_elements_with_rows() {
    let geometry = parse_elements(GEOMETRY);
    assert_eq!(geometry.len(), 3);

    let table = moments::parse_table(
        "Element;CS;LC;Shape;History;Mx;My;Mxy\n\
         1;0;1;;;0;-2,5;0\n\
         3;0;1;;;0;7,5;0\n",
    );

    let scene =
        build_moment_scene("Z=-6.15", &geometry, &table, 1, MomentField::My).expect("scene built");

    assert_eq!(scene.rendered_element_count(), 2);
    assert_eq!(scene.legend.bin_count, LEGEND_BINS);
    assert_eq!(scene.legend.min, -2.5);
    assert_eq!(scene.legend.max, 7.5);
    assert_eq!(scene.bin_of(1), Some(0));
    assert_eq!(scene.bin_of(3), Some(LEGEND_BINS - 1));
    assert_eq!(scene.bin_of(2), None);
    assert_eq!(scene.bin_histogram().iter().sum::<usize>(), 2);
    assert_eq!(scene.title_right, "Mosaic of My | LC=1");
}

#[test]
fn displacement_mosaic_averages_node_values() {
    let geometry = parse_elements(GEOMETRY);
    let table = displacements::parse_table(
        "Node;RSN;RSN_Table;Ux;Uy;Uz\n\
         1;2;2;0;0;-1\n\
         2;2;2;0;0;-3\n\
         7;2;2;0;0;-10\n",
    );

    let scene = build_displacement_scene("Z=0", &geometry, &table, 2, DisplacementField::Uz)
        .expect("scene built");

    // element 1 sees nodes 1 and 2, element 2 sees node 2, element 3 sees node 7
    assert_eq!(scene.rendered_element_count(), 3);
    assert_eq!(scene.legend.min, -10.0);
    assert_eq!(scene.legend.max, -2.0);
    assert_eq!(scene.bin_of(3), Some(0));
    assert!(build_displacement_scene("Z=0", &geometry, &table, 9, DisplacementField::Uz).is_none());
}

#[test]
fn no_overlap_between_geometry_and_values_gives_no_scene() {
    let geometry = parse_elements(GEOMETRY);
    let table = moments::parse_table("Element;CS;LC;Shape;History;Mx;My;Mxy\n42;0;1;;;1;1;1\n");
    assert!(build_moment_scene("Z=0", &geometry, &table, 1, MomentField::Mx).is_none());
}
