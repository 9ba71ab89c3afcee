use cayley_bessel::*;
use wide::f64x4;

fn show(z: Complex<f64>) -> num_complex::Complex<f64> {
    z.into()
}

fn main() {
    let z = Complex::new(1.0_f64, 2.0);
    let zc = show(z);

    // -- Single-order Bessel functions --
    println!("=== Single order (f64) ===");
    println!("J_0.5({zc}) = {}", show(cyl_bessel_j(0.5, z)));
    println!("Y_1({zc}) = {}", show(cyl_bessel_y1(z)));
    println!("I_0({zc}) = {}", show(cyl_bessel_in(0, z)));
    println!("K_1({zc}) = {}", show(cyl_bessel_kn(1, z)));
    println!("H^(1)_0({zc}) = {}", show(cyl_bessel_h1(0, z)));
    println!("H^(2)_0({zc}) = {}", show(cyl_bessel_h2(0, z)));

    // -- Negative order --
    println!("\n=== Negative order ===");
    println!("J_-0.5({zc}) = {}", show(cyl_bessel_j(-0.5, z)));
    println!("K_-3({zc}) = {}", show(cyl_bessel_kn(-3, z)));
    println!("K_3({zc})  = {}  (should be equal)", show(cyl_bessel_kn(3, z)));

    // -- Batch --
    println!("\n=== Batch: J_0 .. J_3 ===");
    let mut buf = [Complex::zero(); 4];
    match cyl_bessel_jn_seq(3, z, &mut buf) {
        Ok(_) => {
            for (k, v) in buf.iter().enumerate() {
                println!("  J_{k}({zc}) = {}", show(*v));
            }
        }
        Err(e) => println!("  error: {e}"),
    }

    // -- Real argument --
    println!("\n=== Real argument ===");
    println!("K_1.5(2) = {}", show(cyl_bessel_k(1.5, 2.0_f64)));
    println!("Y_0(0) = {}  (pole)", show(cyl_bessel_y0(0.0_f64)));

    // -- Four lanes at once --
    println!("\n=== f64x4 lanes ===");
    let w = Complex::new(f64x4::new([0.5, 5.0, 25.0, -3.0]), f64x4::splat(0.5));
    let j = cyl_bessel_j0(w);
    for i in 0..4 {
        let zi = Complex::new(w.re().to_array()[i], w.im().to_array()[i]);
        let ji = Complex::new(j.re().to_array()[i], j.im().to_array()[i]);
        println!("  J_0({}) = {}", show(zi), show(ji));
    }

    // -- Quaternion argument --
    println!("\n=== Quaternion argument ===");
    let q = Quaternion::<f64>::from_components(&[1.0, 0.5, -1.0, 0.25]);
    let v = cyl_bessel_j0(q);
    let parts: Vec<f64> = (0..4).map(|i| v.component(i)).collect();
    println!("J_0(1 + 0.5i - j + 0.25k) = {parts:?}");

    // -- Spherical and Airy --
    println!("\n=== Spherical and Airy ===");
    println!("j_2({zc}) = {}", show(sph_bessel_jn(2, z)));
    println!("k_0({zc}) = {}", show(sph_bessel_kn(0, z)));
    println!("Ai({zc}) = {}", show(airy_ai(z, AiryDerivative::Value)));
    println!("Bi'({zc}) = {}", show(airy_bi(z, AiryDerivative::Derivative)));

    // -- Special values --
    println!("\n=== Special values ===");
    let bad = cyl_bessel_j(2.0e5, z);
    println!("J_200000({zc}) failed: {}", is_failed(bad));
    let x = div(Complex::new(1.0_f64, 0.0), Complex::new(0.0, 0.0));
    println!("1 / 0 is complex infinity: {}", is_infinite(x));
}
