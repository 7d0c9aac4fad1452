use geo::Point;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Encodes a point (x = longitude, y = latitude) as a geohash of `precision`
/// characters.
///
/// Bits alternate longitude then latitude. A bit is set only when the
/// coordinate is strictly above the midpoint, so points on a cell boundary
/// fall into the lower cell.
pub fn encode(point: Point, precision: usize) -> String {
    let (lon, lat) = point.x_y();
    let mut lon_range = (-180.0, 180.0);
    let mut lat_range = (-90.0, 90.0);

    let mut output = String::with_capacity(precision);
    let mut even = true;
    while output.len() < precision {
        let mut index = 0;
        for _ in 0..5 {
            let (value, range) = if even {
                (lon, &mut lon_range)
            } else {
                (lat, &mut lat_range)
            };
            let mid = (range.0 + range.1) / 2.0;

            index <<= 1;
            if value > mid {
                index |= 1;
                range.0 = mid;
            } else {
                range.1 = mid;
            }
            even = !even;
        }
        output.push(BASE32[index] as char);
    }

    output
}
