use super::util::*;
use super::*;

pub(crate) fn plane_copy(
    dst: &mut [pel],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
) {
    for y in 0..height {
        dst[y * i_dst..y * i_dst + width].copy_from_slice(&src[y * i_src..y * i_src + width]);
    }
}

pub(crate) fn block_copy(
    dst: &mut [pel],
    i_dst: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
) {
    debug_assert!(width & 3 == 0 && height & 3 == 0);
    for y in (0..height).step_by(4) {
        for i in y..y + 4 {
            let (d, s) = (i * i_dst, i * i_src);
            dst[d..d + width].copy_from_slice(&src[s..s + width]);
        }
    }
}

pub(crate) fn plane_copy_deinterleave(
    dst_u: &mut [pel],
    i_dst_u: usize,
    dst_v: &mut [pel],
    i_dst_v: usize,
    src: &[pel],
    i_src: usize,
    width: usize,
    height: usize,
) {
    for y in 0..height {
        let s = &src[y * i_src..y * i_src + 2 * width];
        let u = &mut dst_u[y * i_dst_u..y * i_dst_u + width];
        let v = &mut dst_v[y * i_dst_v..y * i_dst_v + width];
        for (x, uv) in s.chunks_exact(2).enumerate() {
            u[x] = uv[0];
            v[x] = uv[1];
        }
    }
}

pub(crate) fn fill_coeff(dst: &mut [coeff], val: coeff) {
    for c in dst.iter_mut() {
        *c = val;
    }
}

pub(crate) fn fill_pel(dst: &mut [pel], i_dst: usize, width: usize, height: usize, val: pel) {
    for row in dst.chunks_mut(i_dst).take(height) {
        for p in row[..width].iter_mut() {
            *p = val;
        }
    }
}

pub(crate) fn pixel_sub(
    res: &mut [coeff],
    i_res: usize,
    org: &[pel],
    i_org: usize,
    pred: &[pel],
    i_pred: usize,
    width: usize,
    height: usize,
) {
    for y in 0..height {
        let r = &mut res[y * i_res..y * i_res + width];
        let o = &org[y * i_org..y * i_org + width];
        let p = &pred[y * i_pred..y * i_pred + width];
        for x in 0..width {
            r[x] = o[x] as coeff - p[x] as coeff;
        }
    }
}

/* add b/w pred and residual and clip it into rec */
pub(crate) fn pixel_add(
    rec: &mut [pel],
    i_rec: usize,
    pred: &[pel],
    i_pred: usize,
    res: &[coeff],
    i_res: usize,
    width: usize,
    height: usize,
    bit_depth: u32,
) {
    for y in 0..height {
        for x in 0..width {
            let t0 = res[y * i_res + x] + pred[y * i_pred + x] as i32;
            rec[y * i_rec + x] = clip_pel(t0, bit_depth) as pel;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deinterleave() {
        let src: Vec<pel> = (0..16).map(|v| v as pel).collect();
        let mut u = vec![0 as pel; 8];
        let mut v = vec![0 as pel; 8];
        plane_copy_deinterleave(&mut u, 4, &mut v, 4, &src, 8, 3, 2);
        assert_eq!(u, vec![0, 2, 4, 0, 8, 10, 12, 0]);
        assert_eq!(v, vec![1, 3, 5, 0, 9, 11, 13, 0]);
    }

    #[test]
    fn copies_leave_stride_gap() {
        let src: Vec<pel> = (0..64).map(|v| v as pel).collect();
        let mut a = vec![99 as pel; 8 * 8];
        let mut b = vec![99 as pel; 8 * 8];
        plane_copy(&mut a, 8, &src, 8, 4, 4);
        block_copy(&mut b, 8, &src, 8, 4, 4);
        assert_eq!(a, b);
        assert_eq!(a[3], 3);
        assert_eq!(a[4], 99);
        assert_eq!(a[3 * 8 + 3], 27);
        assert_eq!(a[4 * 8], 99);
    }

    #[test]
    fn sub_then_add_restores() {
        let org: Vec<pel> = (0..16).map(|v| (v * 13 % 256) as pel).collect();
        let pred: Vec<pel> = (0..16).map(|v| (255 - v * 7) as pel).collect();
        let mut res = vec![0; 16];
        pixel_sub(&mut res, 4, &org, 4, &pred, 4, 4, 4);
        let mut rec = vec![0 as pel; 16];
        pixel_add(&mut rec, 4, &pred, 4, &res, 4, 4, 4, 8);
        assert_eq!(rec, org);
    }

    #[test]
    fn add_clips() {
        let pred = vec![250 as pel, 3];
        let res = vec![10, -10];
        let mut rec = vec![0 as pel; 2];
        pixel_add(&mut rec, 2, &pred, 2, &res, 2, 2, 1, 8);
        assert_eq!(rec, vec![255, 0]);
    }

    #[test]
    fn fills() {
        let mut p = vec![0 as pel; 12];
        fill_pel(&mut p, 4, 2, 3, 7);
        assert_eq!(p, vec![7, 7, 0, 0, 7, 7, 0, 0, 7, 7, 0, 0]);
        let mut c = vec![1; 5];
        fill_coeff(&mut c, -3);
        assert_eq!(c, vec![-3; 5]);
    }
}
