use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::texture::{Texture, Texture3D};

pub const TEST_IMAGE_SIZE: usize = 64;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_d17e)
}

/// RGB gradient with a little noise, every pixel close to its neighbors.
///
/// Has a few thousand distinct colors, far more than the web safe palette.
pub fn gradient_rgb(size: usize) -> Texture<u8> {
    let mut rng = seeded_rng();
    let scale = 255.0 / (size - 1) as f64;
    let mut data = Vec::with_capacity(size * size * 3);
    for y in 0..size {
        for x in 0..size {
            let noise = rng.random_range(0..4u8);
            data.push((x as f64 * scale) as u8);
            data.push((y as f64 * scale) as u8);
            data.push((((x + y) as f64 * scale / 2.0) as u8).saturating_add(noise));
        }
    }
    Texture::from_vec(size, size, 3, data).unwrap()
}

pub fn random_u8(width: usize, height: usize, planes: usize) -> Vec<u8> {
    let mut rng = seeded_rng();
    (0..width * height * planes).map(|_| rng.random()).collect()
}

pub fn random_texture(width: usize, height: usize, planes: usize) -> Texture<u8> {
    Texture::from_vec(width, height, planes, random_u8(width, height, planes)).unwrap()
}

pub fn random_texture_3d(width: usize, height: usize, planes: usize) -> Texture3D<u8> {
    Texture3D::from_slice(width, height, planes, &random_u8(width, height, planes)).unwrap()
}
